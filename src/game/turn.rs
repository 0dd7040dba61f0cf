//! The turn state machine: collects capture and move candidates of the active
//! color, enforces the forced-capture rule, reacts to user intents and chains
//! multi-jump sequences.
//!
//! A turn goes through these phases:
//!
//! ```text
//! begin_turn ──> AwaitingSelection <──> AwaitingDestination ──> TurnEnded
//!     │                 ^                        │
//!     │                 └── capture continues ───┘
//!     └──> NoLegalMoves
//! ```
//!
//! Querying and executing happen synchronously inside [`TurnOrchestrator`]
//! calls and never form a resting phase.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::error::{Error, Rejection, Result};
use crate::game::notification::{Destination, Mode, Notification};
use crate::rules::board::Board;
use crate::rules::core::{Color, Position};
use crate::rules::piece::{Jumps, Moves};

/// Resting state of the orchestrator between two calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No turn has been started.
    Idle,
    /// Waiting for one of the activated pieces to be selected.
    AwaitingSelection,
    /// A piece is selected, its destinations are open.
    AwaitingDestination {
        #[allow(missing_docs)]
        selected: Position,
    },
    /// The active color has finished its turn.
    TurnEnded,
    /// The active color could neither capture nor move.
    NoLegalMoves,
}

/// Outcome of an executed destination intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnProgress {
    /// The moved piece has to continue capturing. The color does not change.
    Continuing,
    /// The turn is over.
    Ended,
}

#[derive(Clone, Debug)]
enum Candidates {
    Jumps(Jumps),
    Moves(Moves),
}

impl Candidates {
    fn destinations(&self) -> Vec<Destination> {
        match self {
            Self::Jumps(jumps) => jumps
                .iter()
                .map(|jump| Destination {
                    landing: jump.landing,
                    captured: Some(jump.captured),
                })
                .collect(),
            Self::Moves(moves) => moves
                .iter()
                .map(|&landing| Destination {
                    landing,
                    captured: None,
                })
                .collect(),
        }
    }
}

/// A piece that can be selected this turn together with what it can do.
#[derive(Clone, Debug)]
struct Activation {
    position: Position,
    candidates: Candidates,
}

/// Coordinates a single turn of the active color. Owns the board.
#[derive(Clone, Debug)]
pub struct TurnOrchestrator {
    board: Board,
    color: Color,
    phase: Phase,
    mode: Mode,
    activated: Vec<Activation>,
    continuing: bool,
    notifications: VecDeque<Notification>,
}

impl TurnOrchestrator {
    /// Creates an idle orchestrator. The first turn starts with
    /// [`TurnOrchestrator::begin_turn`].
    #[must_use]
    pub fn new(board: Board) -> Self {
        let color = board.bottom();
        Self {
            board,
            color,
            phase: Phase::Idle,
            mode: Mode::Move,
            activated: Vec::new(),
            continuing: false,
            notifications: VecDeque::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Color whose turn is (or was last) in progress.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the activated pieces capture or move this turn.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// True while the piece that has just captured must keep capturing.
    #[must_use]
    pub const fn is_continuing(&self) -> bool {
        self.continuing
    }

    /// Pieces that can be selected, in row-major order.
    #[must_use]
    pub fn activated(&self) -> Vec<Position> {
        self.activated
            .iter()
            .map(|activation| activation.position)
            .collect()
    }

    /// Destinations of the selected piece. Empty if nothing is selected.
    #[must_use]
    pub fn open_destinations(&self) -> Vec<Destination> {
        match self.phase {
            Phase::AwaitingDestination { selected } => self
                .find(selected)
                .map(|activation| activation.candidates.destinations())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Drains the notifications produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Starts a turn for `color`: activates every piece that can capture or,
    /// if there are none, every piece that can move.
    pub fn begin_turn(&mut self, color: Color) {
        self.color = color;
        self.continuing = false;
        self.activated.clear();

        let captures: Vec<Activation> = self
            .board
            .pieces(color)
            .filter_map(|piece| {
                let jumps = piece.compute_jumps(&self.board);
                (!jumps.is_empty()).then(|| Activation {
                    position: piece.position(),
                    candidates: Candidates::Jumps(jumps),
                })
            })
            .collect();
        debug!(%color, captures = captures.len(), "queried captures");

        // Capturing is mandatory: plain moves are only considered when there
        // is nothing to capture.
        if captures.is_empty() {
            self.mode = Mode::Move;
            self.activated = self
                .board
                .pieces(color)
                .filter_map(|piece| {
                    let moves = piece.compute_moves(&self.board);
                    (!moves.is_empty()).then(|| Activation {
                        position: piece.position(),
                        candidates: Candidates::Moves(moves),
                    })
                })
                .collect();
            debug!(%color, moves = self.activated.len(), "queried moves");
        } else {
            self.mode = Mode::Capture;
            self.activated = captures;
        }

        if self.activated.is_empty() {
            info!(%color, "no legal moves");
            self.phase = Phase::NoLegalMoves;
            self.notifications.push_back(Notification::NoLegalMoves(color));
            return;
        }
        info!(%color, mode = %self.mode, "turn started");
        self.phase = Phase::AwaitingSelection;
        self.notify_activated();
    }

    /// Selects an activated piece and opens its destinations. Selecting
    /// another activated piece replaces the previous selection.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalSelection`] if the piece is not activated. Nothing
    /// changes in this case.
    pub fn select(&mut self, position: Position) -> Result<()> {
        let destinations = match self.phase {
            Phase::AwaitingSelection | Phase::AwaitingDestination { .. } => self
                .find(position)
                .map(|activation| activation.candidates.destinations()),
            _ => None,
        };
        let Some(destinations) = destinations else {
            return Err(self.reject(Rejection::NotActivated(position)));
        };
        debug!(%position, "piece selected");
        self.phase = Phase::AwaitingDestination { selected: position };
        self.notifications
            .push_back(Notification::OpenDestinationsChanged {
                mode: self.mode,
                destinations,
            });
        Ok(())
    }

    /// Cancels the selection. The activated pieces stay the same and the turn
    /// is not consumed. Does nothing if no piece is selected.
    pub fn deselect(&mut self) {
        let Phase::AwaitingDestination { selected } = self.phase else {
            debug!(phase = ?self.phase, "nothing to deselect");
            return;
        };
        debug!(%selected, "piece deselected");
        self.phase = Phase::AwaitingSelection;
        self.notify_cleared_destinations();
        self.notify_activated();
    }

    /// Moves the selected piece to one of its open destinations. A capture
    /// also removes the captured piece and checks whether the same piece can
    /// keep capturing from where it landed.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalSelection`] if nothing is selected or the destination
    /// is not open. The board and the turn state are untouched in this case.
    pub fn choose_destination(&mut self, destination: Position) -> Result<TurnProgress> {
        let Phase::AwaitingDestination { selected } = self.phase else {
            return Err(self.reject(Rejection::NothingSelected(destination)));
        };
        let candidates = match self.find(selected) {
            Some(activation) => activation.candidates.clone(),
            None => return Err(self.reject(Rejection::NothingSelected(destination))),
        };
        match candidates {
            Candidates::Moves(moves) => {
                if !moves.contains(&destination) {
                    return Err(self.reject(Rejection::NotOpen(destination)));
                }
                self.board.relocate(selected, destination)?;
                debug!(from = %selected, to = %destination, "moved");
                Ok(self.end_turn())
            },
            Candidates::Jumps(jumps) => {
                let Some(jump) = jumps.iter().find(|jump| jump.landing == destination) else {
                    return Err(self.reject(Rejection::NotOpen(destination)));
                };
                // Both halves of the capture are checked before the board is
                // touched.
                if self.board.piece_at(jump.captured).is_none() {
                    return Err(Error::EmptySource(jump.captured));
                }
                self.board.relocate(selected, jump.landing)?;
                let _ = self.board.remove_piece(jump.captured)?;
                debug!(from = %selected, to = %jump.landing, captured = %jump.captured, "captured");
                Ok(self.continue_capture(jump.landing))
            },
        }
    }

    /// Stops the turn in progress and clears all activation state.
    pub fn halt(&mut self) {
        self.activated.clear();
        self.continuing = false;
        self.phase = Phase::Idle;
    }

    fn continue_capture(&mut self, landing: Position) -> TurnProgress {
        let jumps = match self.board.piece_at(landing) {
            Some(piece) => piece.compute_jumps(&self.board),
            None => Jumps::new(),
        };
        if jumps.is_empty() {
            return self.end_turn();
        }
        info!(color = %self.color, position = %landing, "capture continues");
        self.activated = vec![Activation {
            position: landing,
            candidates: Candidates::Jumps(jumps),
        }];
        self.mode = Mode::Capture;
        self.continuing = true;
        self.phase = Phase::AwaitingSelection;
        self.notify_cleared_destinations();
        self.notify_activated();
        TurnProgress::Continuing
    }

    fn end_turn(&mut self) -> TurnProgress {
        info!(color = %self.color, "turn ended");
        self.activated.clear();
        self.continuing = false;
        self.phase = Phase::TurnEnded;
        self.notifications.push_back(Notification::TurnEnded);
        TurnProgress::Ended
    }

    fn find(&self, position: Position) -> Option<&Activation> {
        self.activated
            .iter()
            .find(|activation| activation.position == position)
    }

    fn reject(&self, rejection: Rejection) -> Error {
        warn!(color = %self.color, phase = ?self.phase, %rejection, "intent rejected");
        Error::IllegalSelection(rejection)
    }

    fn notify_activated(&mut self) {
        let positions = self.activated();
        self.notifications
            .push_back(Notification::ActivatedPiecesChanged {
                mode: self.mode,
                positions,
            });
    }

    fn notify_cleared_destinations(&mut self) {
        self.notifications
            .push_back(Notification::OpenDestinationsChanged {
                mode: self.mode,
                destinations: Vec::new(),
            });
    }
}
