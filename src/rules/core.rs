//! Checkers primitives commonly used within [`crate::rules`].

use std::fmt;
use std::ops::Not;

use anyhow::{bail, Context};
use itertools::Itertools;

/// Smallest supported board: two playable squares per row.
pub const MIN_EDGE_SIZE: u8 = 4;
/// Largest supported board.
pub const MAX_EDGE_SIZE: u8 = 16;
/// Standard English draughts board.
pub const DEFAULT_EDGE_SIZE: u8 = 8;

/// A playable (dark) square of the board.
///
/// Only every other square of a row is playable, so columns are "packed": the
/// column index counts playable squares from the left. On odd rows the
/// playable squares are the even columns of the full grid, on even rows they
/// are the odd ones:
///
/// ```
/// use checkers::rules::core::Position;
///
/// assert_eq!(Position::new(5, 0).grid_column(), 0);
/// assert_eq!(Position::new(4, 0).grid_column(), 1);
/// assert_eq!(Position::new(2, 3).grid_column(), 7);
/// ```
///
/// A position is only meaningful together with a board: the upper bounds are
/// checked by [`crate::rules::board::Board::is_valid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Packed column: index of the playable square within the row.
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Column of the square on the full (unpacked) grid.
    #[must_use]
    pub const fn grid_column(self) -> u8 {
        if self.row % 2 == 1 {
            2 * self.column
        } else {
            2 * self.column + 1
        }
    }

    /// Returns the diagonally adjacent square. The result can still be beyond
    /// the bottom or right edge of a particular board; `None` is only returned
    /// when a coordinate would become negative.
    #[must_use]
    pub fn neighbor(self, diagonal: Diagonal) -> Option<Self> {
        let odd = self.row % 2 == 1;
        let row = match diagonal {
            Diagonal::TopLeft | Diagonal::TopRight => self.row.checked_sub(1)?,
            Diagonal::BottomLeft | Diagonal::BottomRight => self.row.checked_add(1)?,
        };
        let column = match (diagonal, odd) {
            (Diagonal::TopLeft | Diagonal::BottomLeft, true) => self.column.checked_sub(1)?,
            (Diagonal::TopLeft | Diagonal::BottomLeft, false)
            | (Diagonal::TopRight | Diagonal::BottomRight, true) => self.column,
            (Diagonal::TopRight | Diagonal::BottomRight, false) => self.column.checked_add(1)?,
        };
        Some(Self { row, column })
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Parses `row,column`.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let (row, column) = match input.split(',').collect_tuple() {
            Some((row, column)) => (row, column),
            None => bail!("position should be in 'row,column' format, got '{input}'"),
        };
        Ok(Self::new(
            row.trim()
                .parse()
                .with_context(|| format!("incorrect row in position '{input}'"))?,
            column
                .trim()
                .parse()
                .with_context(|| format!("incorrect column in position '{input}'"))?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

/// Two opposing sides. Light has the advantage of the first turn unless
/// configured otherwise.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "l" | "light" => Ok(Self::Light),
            "d" | "dark" => Ok(Self::Dark),
            _ => bail!("color should be 'l' or 'd', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::Light => 'l',
                Self::Dark => 'd',
            }
        )
    }
}

/// Constrains which diagonals a non-promoted piece may use for a plain move.
/// "Forward" is away from the home side of the piece's color.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Any,
}

impl Direction {
    /// Resolves the direction against the diagonals that lead away from home.
    #[must_use]
    pub fn diagonals(self, advance: Diagonals) -> Diagonals {
        match self {
            Self::Forward => advance,
            Self::Backward => advance.complement(),
            Self::Any => Diagonals::all(),
        }
    }
}

/// One of the four diagonal directions, named from the perspective of the
/// board's top (row 0) and left edge.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagonal {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Diagonal {
    /// All diagonals in the order they are examined by the candidate search.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

bitflags::bitflags! {
    /// A set of [`Diagonal`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Diagonals: u8 {
        #[allow(missing_docs)]
        const TOP_LEFT = 0b0001;
        #[allow(missing_docs)]
        const TOP_RIGHT = 0b0010;
        #[allow(missing_docs)]
        const BOTTOM_LEFT = 0b0100;
        #[allow(missing_docs)]
        const BOTTOM_RIGHT = 0b1000;
        /// Both diagonals leading toward row 0.
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Both diagonals leading toward the last row.
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl Diagonals {
    /// Iterates over the contained diagonals in [`Diagonal::ALL`] order.
    pub fn iter_diagonals(self) -> impl Iterator<Item = Diagonal> {
        Diagonal::ALL
            .into_iter()
            .filter(move |diagonal| self.contains(Self::from(*diagonal)))
    }
}

impl From<Diagonal> for Diagonals {
    fn from(diagonal: Diagonal) -> Self {
        match diagonal {
            Diagonal::TopLeft => Self::TOP_LEFT,
            Diagonal::TopRight => Self::TOP_RIGHT,
            Diagonal::BottomLeft => Self::BOTTOM_LEFT,
            Diagonal::BottomRight => Self::BOTTOM_RIGHT,
        }
    }
}
