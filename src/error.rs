//! Errors produced by the rules engine.
//!
//! Parsing and configuration problems are reported through [`anyhow::Error`]
//! with a human-readable context instead: they originate from user input and
//! are only ever displayed.

use std::fmt;

use crate::rules::core::Position;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while mutating the board or reacting to user
/// intent.
///
/// [`Error::IllegalSelection`] is the only variant a well-behaved collaborator
/// can trigger: it is recoverable and guarantees that nothing changed.
/// [`Error::OccupiedDestination`] and [`Error::EmptySource`] indicate board
/// misuse and are never produced by the turn protocol itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Coordinates are outside of the board.
    #[error("position {0} is outside of the board")]
    InvalidPosition(Position),
    /// The target cell already holds a piece.
    #[error("destination {0} is already occupied")]
    OccupiedDestination(Position),
    /// There is no piece to take from the cell.
    #[error("there is no piece at {0}")]
    EmptySource(Position),
    /// User intent does not match the selectable pieces or open destinations.
    #[error("illegal selection: {0}")]
    IllegalSelection(Rejection),
    /// Intent was sent to a session that is not running.
    #[error("the game is not started")]
    NotStarted,
}

/// The reason an intent was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The piece at this position can not be selected this turn.
    NotActivated(Position),
    /// The position is not open for the selected piece.
    NotOpen(Position),
    /// A destination was chosen before selecting a piece.
    NothingSelected(Position),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotActivated(position) => write!(f, "piece at {position} is not activated"),
            Self::NotOpen(position) => write!(f, "destination {position} is not open"),
            Self::NothingSelected(position) => {
                write!(f, "no piece is selected to move to {position}")
            },
        }
    }
}
