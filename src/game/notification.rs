//! Messages the engine sends to the presentation layer.
//!
//! Notifications are queued in the order they are produced and drained by the
//! collaborator. The [`fmt::Display`] implementation is the line format used
//! by the text protocol.

use std::fmt;

use itertools::Itertools;

use crate::rules::core::{Color, Position};

/// Whether the current highlighting is about captures or plain moves.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Capture,
    Move,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Capture => "capture",
            Self::Move => "move",
        })
    }
}

/// An open destination of the selected piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Square the piece ends up on.
    pub landing: Position,
    /// Enemy piece removed by a capture.
    pub captured: Option<Position>,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "{}x{captured}", self.landing),
            None => write!(f, "{}", self.landing),
        }
    }
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Pieces that can be selected now. An empty list clears the highlighting.
    ActivatedPiecesChanged {
        mode: Mode,
        positions: Vec<Position>,
    },
    /// Destinations of the selected piece. An empty list clears the
    /// highlighting.
    OpenDestinationsChanged {
        mode: Mode,
        destinations: Vec<Destination>,
    },
    /// The active color is done. All highlighting is cleared.
    TurnEnded,
    /// The color can neither capture nor move.
    NoLegalMoves(Color),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivatedPiecesChanged { mode, positions } => {
                write!(f, "activated {mode}")?;
                if !positions.is_empty() {
                    write!(f, " {}", positions.iter().join(" "))?;
                }
                Ok(())
            },
            Self::OpenDestinationsChanged { mode, destinations } => {
                write!(f, "destinations {mode}")?;
                if !destinations.is_empty() {
                    write!(f, " {}", destinations.iter().join(" "))?;
                }
                Ok(())
            },
            Self::TurnEnded => write!(f, "turnend"),
            Self::NoLegalMoves(color) => write!(f, "nomoves {color}"),
        }
    }
}
