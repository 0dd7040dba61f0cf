//! Pieces and the candidate search: which enemy pieces a piece can capture and
//! which squares it can step onto.
//!
//! Candidates are always computed against a board snapshot passed by
//! reference. A piece never stores the board it stands on.

use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;

use crate::rules::board::Board;
use crate::rules::core::{Color, Diagonals, Direction, Position};

/// A single legal capture: the enemy piece removed and the empty square the
/// capturing piece lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpCandidate {
    #[allow(missing_docs)]
    pub captured: Position,
    #[allow(missing_docs)]
    pub landing: Position,
}

/// Captures available to one piece. A piece looks in four directions, so
/// there are at most four of them.
pub type Jumps = ArrayVec<JumpCandidate, 4>;

/// Empty squares reachable by a plain diagonal step.
pub type Moves = ArrayVec<Position, 4>;

/// A checker standing on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    direction: Direction,
    position: Position,
    promoted: bool,
}

impl Piece {
    /// Creates a regular (non-promoted) piece.
    #[must_use]
    pub const fn new(color: Color, direction: Direction, position: Position) -> Self {
        Self {
            color,
            direction,
            position,
            promoted: false,
        }
    }

    /// Creates a promoted piece. Promoted pieces are not restricted to a
    /// direction.
    #[must_use]
    pub const fn promoted(color: Color, position: Position) -> Self {
        Self {
            color,
            direction: Direction::Any,
            position,
            promoted: true,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_promoted(&self) -> bool {
        self.promoted
    }

    pub(super) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Finds all single captures available from the current position.
    ///
    /// All four diagonals are searched regardless of [`Direction`]: a regular
    /// piece may capture backwards. The search does not look further than one
    /// capture ahead, chaining is handled by the turn orchestrator.
    #[must_use]
    pub fn compute_jumps(&self, board: &Board) -> Jumps {
        let mut jumps = Jumps::new();
        // TODO: Search full diagonal rays for promoted pieces: land on any
        // empty square past a single enemy piece.
        if self.promoted {
            return jumps;
        }
        for diagonal in Diagonals::all().iter_diagonals() {
            let Some(captured) = board.neighbor(self.position, diagonal) else {
                continue;
            };
            match board.piece_at(captured) {
                Some(enemy) if enemy.color != self.color => {},
                _ => continue,
            }
            // The step continues past the enemy piece along the same diagonal.
            let Some(landing) = board.neighbor(captured, diagonal) else {
                continue;
            };
            if board.piece_at(landing).is_none() {
                jumps.push(JumpCandidate { captured, landing });
            }
        }
        jumps
    }

    /// Finds empty squares reachable by a plain step in the directions this
    /// piece is allowed to move.
    #[must_use]
    pub fn compute_moves(&self, board: &Board) -> Moves {
        let mut moves = Moves::new();
        if self.promoted {
            return moves;
        }
        let allowed = self.direction.diagonals(board.advance(self.color));
        for diagonal in allowed.iter_diagonals() {
            if let Some(destination) = board.neighbor(self.position, diagonal) {
                if board.piece_at(destination).is_none() {
                    moves.push(destination);
                }
            }
        }
        moves
    }

    /// Parses a layout symbol into a piece standing at `position`.
    ///
    /// # Errors
    ///
    /// If the symbol is not one of "lLdD".
    pub fn from_symbol(symbol: char, position: Position) -> anyhow::Result<Self> {
        match symbol {
            'l' => Ok(Self::new(Color::Light, Direction::Forward, position)),
            'd' => Ok(Self::new(Color::Dark, Direction::Forward, position)),
            'L' => Ok(Self::promoted(Color::Light, position)),
            'D' => Ok(Self::promoted(Color::Dark, position)),
            _ => bail!("piece symbol should be within \"lLdD\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    /// Writes the layout symbol: lowercase for regular pieces, uppercase for
    /// promoted ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match (self.color, self.promoted) {
            (Color::Light, false) => 'l',
            (Color::Light, true) => 'L',
            (Color::Dark, false) => 'd',
            (Color::Dark, true) => 'D',
        })
    }
}
