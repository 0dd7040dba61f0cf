//! The playing board: a fixed grid of playable cells, each holding at most one
//! [`Piece`].
//!
//! Only dark squares are playable, so the board stores `edge_size / 2` cells
//! per row (see [`Position`] for the packing). The board has 1:1
//! relationship with its layout notation, a FEN-like string:
//!
//! ```
//! use checkers::rules::board::Board;
//!
//! assert_eq!(
//!     Board::standard().to_string(),
//!     "dddd/dddd/dddd/4/4/llll/llll/llll l"
//! );
//! ```

use std::fmt::{self, Write};

use anyhow::{bail, Context};

use crate::error::{Error, Result};
use crate::rules::core::{
    Color,
    Diagonal,
    Diagonals,
    Direction,
    Position,
    DEFAULT_EDGE_SIZE,
    MAX_EDGE_SIZE,
    MIN_EDGE_SIZE,
};
use crate::rules::piece::Piece;

/// Rows each side fills in the standard starting position.
pub const DEFAULT_ROWS_PER_SIDE: u8 = 3;

/// Square grid of cells. The color placed at the bottom (highest row indices)
/// advances toward row 0, the other one toward the last row.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    edge_size: u8,
    bottom: Color,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board without pieces.
    ///
    /// # Errors
    ///
    /// If `edge_size` is odd or outside of
    /// [`MIN_EDGE_SIZE`]..=[`MAX_EDGE_SIZE`].
    pub fn empty(edge_size: u8, bottom: Color) -> anyhow::Result<Self> {
        if edge_size % 2 != 0 {
            bail!("board edge size should be even, got {edge_size}");
        }
        if !(MIN_EDGE_SIZE..=MAX_EDGE_SIZE).contains(&edge_size) {
            bail!("board edge size should be within {MIN_EDGE_SIZE}..={MAX_EDGE_SIZE}, got {edge_size}");
        }
        let cells = usize::from(edge_size) * usize::from(edge_size / 2);
        Ok(Self {
            edge_size,
            bottom,
            cells: vec![None; cells],
        })
    }

    /// Creates the starting position: each side fills `rows_per_side` rows
    /// next to its edge, all pieces moving forward.
    ///
    /// # Errors
    ///
    /// If the edge size is not supported or the two camps would not be
    /// separated by at least one empty row pair.
    pub fn starting(edge_size: u8, rows_per_side: u8, bottom: Color) -> anyhow::Result<Self> {
        let board = Self::empty(edge_size, bottom)?;
        if rows_per_side == 0 {
            bail!("each side should have at least one row of pieces");
        }
        if u16::from(rows_per_side) * 2 >= u16::from(edge_size) {
            bail!("{rows_per_side} rows per side do not fit on a board with edge size {edge_size}");
        }
        Ok(board.with_camps(rows_per_side))
    }

    /// Standard 8x8 starting position with Light at the bottom.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            edge_size: DEFAULT_EDGE_SIZE,
            bottom: Color::Light,
            cells: vec![None; usize::from(DEFAULT_EDGE_SIZE) * usize::from(DEFAULT_EDGE_SIZE / 2)],
        }
        .with_camps(DEFAULT_ROWS_PER_SIDE)
    }

    /// Fills `rows_per_side` rows next to each edge. Expects an empty board
    /// with enough room for both camps.
    fn with_camps(mut self, rows_per_side: u8) -> Self {
        for row in 0..self.edge_size {
            let color = if row < rows_per_side {
                !self.bottom
            } else if row >= self.edge_size - rows_per_side {
                self.bottom
            } else {
                continue;
            };
            for column in 0..self.width() {
                let position = Position::new(row, column);
                let index = self.index(position);
                self.cells[index] = Some(Piece::new(color, Direction::Forward, position));
            }
        }
        self
    }

    /// Number of rows (and of grid columns).
    #[must_use]
    pub const fn edge_size(&self) -> u8 {
        self.edge_size
    }

    /// Number of playable cells in a row.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.edge_size / 2
    }

    /// Color whose home rows are at the bottom of the board.
    #[must_use]
    pub const fn bottom(&self) -> Color {
        self.bottom
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_valid(&self, position: Position) -> bool {
        position.row() < self.edge_size && position.column() < self.width()
    }

    /// Diagonally adjacent position, if it is on the board.
    #[must_use]
    pub fn neighbor(&self, position: Position, diagonal: Diagonal) -> Option<Position> {
        position
            .neighbor(diagonal)
            .filter(|neighbor| self.is_valid(*neighbor))
    }

    /// The two diagonals leading away from the home side of `color`.
    #[must_use]
    pub fn advance(&self, color: Color) -> Diagonals {
        if color == self.bottom {
            Diagonals::TOP
        } else {
            Diagonals::BOTTOM
        }
    }

    /// Returns the piece at given position. Invalid positions are empty.
    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        if !self.is_valid(position) {
            return None;
        }
        self.cells[self.index(position)].as_ref()
    }

    /// Puts a new piece on the cell its position points to.
    ///
    /// # Errors
    ///
    /// If the position is invalid or the cell is occupied.
    pub fn place(&mut self, piece: Piece) -> Result<()> {
        self.attach(piece.position(), piece)
    }

    /// Removes the piece from the board for good.
    ///
    /// # Errors
    ///
    /// If the position is invalid or the cell is empty.
    pub fn remove_piece(&mut self, position: Position) -> Result<Piece> {
        self.detach(position)
    }

    /// Takes the piece out of its cell, transferring ownership to the caller.
    ///
    /// # Errors
    ///
    /// If the position is invalid or the cell is empty.
    pub fn detach(&mut self, position: Position) -> Result<Piece> {
        let index = self.checked_index(position)?;
        self.cells[index]
            .take()
            .ok_or(Error::EmptySource(position))
    }

    /// Puts the piece into the cell and updates its position accordingly.
    ///
    /// # Errors
    ///
    /// If the position is invalid or the cell is occupied.
    pub fn attach(&mut self, position: Position, mut piece: Piece) -> Result<()> {
        let index = self.checked_index(position)?;
        if self.cells[index].is_some() {
            return Err(Error::OccupiedDestination(position));
        }
        piece.set_position(position);
        self.cells[index] = Some(piece);
        Ok(())
    }

    /// Moves the piece from one cell to another. Either fully applies or
    /// leaves the board untouched.
    ///
    /// # Errors
    ///
    /// If either position is invalid, `from` is empty or `to` is occupied.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<()> {
        let _ = self.checked_index(from)?;
        if self.checked_index(to).map(|index| self.cells[index].is_some())? {
            return Err(Error::OccupiedDestination(to));
        }
        let piece = self.detach(from)?;
        self.attach(to, piece)
    }

    /// Pieces of given color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter(move |piece| piece.color() == color)
    }

    /// Total number of pieces on the board.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn count_of(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Parses the board from layout notation:
    ///
    /// ```text
    /// LAYOUT ::= Placement ' ' Bottom color
    /// ```
    ///
    /// Placement lists the rows from the top (row 0) separated by '/'. Each
    /// row lists its playable squares from left to right: "l" and "d" for
    /// regular pieces, "L" and "D" for promoted ones and digits for runs of
    /// empty squares.
    ///
    /// NOTE: This expects properly formatted input without surrounding
    /// whitespace. Use [`Board::try_from`] to clean up the input.
    ///
    /// # Errors
    ///
    /// If the layout is malformed or describes an unsupported board.
    pub fn from_layout(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let placement = match parts.next() {
            Some(placement) if !placement.is_empty() => placement,
            _ => bail!("incorrect layout: missing piece placement"),
        };
        let bottom = match parts.next() {
            Some(value) => Color::try_from(value)?,
            None => bail!("incorrect layout: missing bottom color"),
        };
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in layout");
        }
        let rows: Vec<&str> = placement.split('/').collect();
        let edge_size = u8::try_from(rows.len())
            .with_context(|| format!("incorrect layout: too many rows in {placement}"))?;
        let mut board = Self::empty(edge_size, bottom).context("incorrect layout")?;
        let width = board.width();
        for (row, row_layout) in (0..edge_size).zip(rows) {
            let mut column: u8 = 0;
            for symbol in row_layout.chars() {
                if column >= width {
                    bail!("incorrect layout: row {row} should have {width} squares, got {row_layout}");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='9' => {
                        column += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                board.place(Piece::from_symbol(symbol, Position::new(row, column))?)?;
                column += 1;
            }
            if column != width {
                bail!("incorrect layout: row {row} should have {width} squares, got {row_layout}");
            }
        }
        Ok(board)
    }

    fn index(&self, position: Position) -> usize {
        usize::from(position.row()) * usize::from(self.width()) + usize::from(position.column())
    }

    fn checked_index(&self, position: Position) -> Result<usize> {
        if self.is_valid(position) {
            Ok(self.index(position))
        } else {
            Err(Error::InvalidPosition(position))
        }
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_layout(input.trim())
    }
}

impl fmt::Display for Board {
    /// Prints the board in layout notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.edge_size {
            let mut empty_squares = 0;
            for column in 0..self.width() {
                if let Some(piece) = self.piece_at(Position::new(row, column)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row + 1 != self.edge_size {
                const ROW_SEPARATOR: char = '/';
                f.write_char(ROW_SEPARATOR)?;
            }
        }
        write!(f, " {}", self.bottom)
    }
}

impl fmt::Debug for Board {
    /// Dumps the full grid: '.' for an empty playable square, '-' for a square
    /// that can not be played on, layout symbol for a piece.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.edge_size {
            for grid_column in 0..self.edge_size {
                // Odd rows start with a playable square, even rows don't.
                if (row + grid_column) % 2 == 0 {
                    f.write_char(NON_PLAYABLE_SQUARE)?;
                } else {
                    match self.piece_at(Position::new(row, grid_column / 2)) {
                        Some(piece) => write!(f, "{piece}"),
                        None => f.write_char(EMPTY_SQUARE),
                    }?;
                }
                if grid_column + 1 != self.edge_size {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if row + 1 != self.edge_size {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
const EMPTY_SQUARE: char = '.';
const NON_PLAYABLE_SQUARE: char = '-';

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(layout: &str) -> Board {
        let board = Board::try_from(layout);
        assert!(board.is_ok(), "input: {layout}");
        let board = board.unwrap();
        assert_eq!(board.to_string(), layout);
        board
    }

    #[test]
    fn standard() {
        let board = Board::standard();
        assert_eq!(board.count(), 24);
        assert_eq!(board.count_of(Color::Light), 12);
        assert_eq!(board.count_of(Color::Dark), 12);
        assert_eq!(
            board,
            Board::starting(DEFAULT_EDGE_SIZE, DEFAULT_ROWS_PER_SIDE, Color::Light).unwrap()
        );
        assert_eq!(
            board,
            setup("dddd/dddd/dddd/4/4/llll/llll/llll l")
        );
    }

    #[test]
    fn starting_positions() {
        assert_eq!(
            Board::starting(10, 4, Color::Light).unwrap().to_string(),
            "ddddd/ddddd/ddddd/ddddd/5/5/lllll/lllll/lllll/lllll l"
        );
        assert_eq!(
            Board::starting(8, 2, Color::Dark).unwrap().to_string(),
            "llll/llll/4/4/4/4/dddd/dddd d"
        );
        assert_eq!(
            Board::starting(4, 1, Color::Light).unwrap().to_string(),
            "dd/2/2/ll l"
        );
    }

    #[test]
    #[should_panic(expected = "board edge size should be even, got 7")]
    fn odd_edge_size() {
        let _ = Board::empty(7, Color::Light).unwrap();
    }

    #[test]
    #[should_panic(expected = "board edge size should be within 4..=16, got 18")]
    fn too_large_edge_size() {
        let _ = Board::empty(18, Color::Light).unwrap();
    }

    #[test]
    #[should_panic(expected = "4 rows per side do not fit on a board with edge size 8")]
    fn overlapping_camps() {
        let _ = Board::starting(8, 4, Color::Light).unwrap();
    }

    #[test]
    fn correct_layouts() {
        let _ = setup("4/4/4/1d2/1l2/4/4/4 l");
        let _ = setup("4/1d2/4/1d2/1l2/4/4/4 d");
        let _ = setup("D3/4/4/4/4/4/4/3L l");
        let _ = setup("ddddd/ddddd/ddddd/ddddd/5/5/lllll/lllll/lllll/lllll l");
    }

    #[test]
    fn layout_pieces() {
        let board = setup("D3/4/4/2d1/4/4/4/3L l");
        let dark = board.piece_at(Position::new(3, 2)).unwrap();
        assert_eq!(dark.color(), Color::Dark);
        assert_eq!(dark.direction(), Direction::Forward);
        assert_eq!(dark.position(), Position::new(3, 2));
        assert!(!dark.is_promoted());
        let king = board.piece_at(Position::new(0, 0)).unwrap();
        assert!(king.is_promoted());
        assert_eq!(king.direction(), Direction::Any);
        assert_eq!(board.count(), 3);
    }

    #[test]
    fn clean_layout_str() {
        assert!(Board::try_from("\n dddd/dddd/dddd/4/4/llll/llll/llll l \n").is_ok());
        assert!(Board::from_layout(" dddd/dddd/dddd/4/4/llll/llll/llll l").is_err());
    }

    #[test]
    fn no_crash() {
        // Wrong number of squares in a row.
        assert!(Board::try_from("ddddd/dddd/dddd/4/4/llll/llll/llll l").is_err());
        assert!(Board::try_from("ddd/dddd/dddd/4/4/llll/llll/llll l").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/44/4/llll/llll/llll l").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/9/4/llll/llll/llll l").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/0/4/llll/llll/llll l").is_err());
        // Wrong number of rows.
        assert!(Board::try_from("dddd/dddd/dddd/4/llll/llll/llll l").is_err());
        assert!(Board::try_from("dd/dd/dd l").is_err());
        // Unknown symbols, bottom color and trailing parts.
        assert!(Board::try_from("dddd/dddd/dddd/4/4/llll/llll/lllk l").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/4/4/llll/llll/llll w").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/4/4/llll/llll/llll").is_err());
        assert!(Board::try_from("dddd/dddd/dddd/4/4/llll/llll/llll l l").is_err());
        assert!(Board::try_from("").is_err());
        assert!(Board::try_from("dd/🔠/2/ll l").is_err());
    }

    #[test]
    fn debug_dump() {
        let board = Board::starting(4, 1, Color::Light).unwrap();
        assert_eq!(
            format!("{board:?}"),
            "- d - d\n\
             . - . -\n\
             - . - .\n\
             l - l -"
        );
    }

    #[test]
    fn relocate() {
        let mut board = Board::standard();
        board
            .relocate(Position::new(5, 1), Position::new(4, 1))
            .unwrap();
        assert!(board.piece_at(Position::new(5, 1)).is_none());
        assert_eq!(
            board.piece_at(Position::new(4, 1)).unwrap().position(),
            Position::new(4, 1)
        );
        assert_eq!(board.count(), 24);
        assert_eq!(board.to_string(), "dddd/dddd/dddd/4/1l2/l1ll/llll/llll l");
    }

    #[test]
    fn relocate_failures_leave_board_untouched() {
        let mut board = Board::standard();
        let before = board.clone();
        assert_eq!(
            board.relocate(Position::new(5, 1), Position::new(6, 1)),
            Err(Error::OccupiedDestination(Position::new(6, 1)))
        );
        assert_eq!(
            board.relocate(Position::new(4, 1), Position::new(3, 1)),
            Err(Error::EmptySource(Position::new(4, 1)))
        );
        assert_eq!(
            board.relocate(Position::new(5, 1), Position::new(4, 4)),
            Err(Error::InvalidPosition(Position::new(4, 4)))
        );
        assert_eq!(
            board.relocate(Position::new(8, 0), Position::new(4, 0)),
            Err(Error::InvalidPosition(Position::new(8, 0)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::empty(DEFAULT_EDGE_SIZE, Color::Light).unwrap();
        let piece = Piece::new(Color::Dark, Direction::Forward, Position::new(3, 1));
        board.place(piece).unwrap();
        assert_eq!(
            board.place(piece),
            Err(Error::OccupiedDestination(Position::new(3, 1)))
        );
        assert_eq!(
            board.place(Piece::new(Color::Dark, Direction::Forward, Position::new(3, 4))),
            Err(Error::InvalidPosition(Position::new(3, 4)))
        );
        assert_eq!(board.remove_piece(Position::new(3, 1)), Ok(piece));
        assert_eq!(
            board.remove_piece(Position::new(3, 1)),
            Err(Error::EmptySource(Position::new(3, 1)))
        );
        assert_eq!(board.count(), 0);
    }

    #[test]
    fn detach_and_attach() {
        let mut board = Board::standard();
        let piece = board.detach(Position::new(2, 0)).unwrap();
        assert_eq!(piece.position(), Position::new(2, 0));
        board.attach(Position::new(3, 0), piece).unwrap();
        assert_eq!(
            board.piece_at(Position::new(3, 0)).unwrap().position(),
            Position::new(3, 0)
        );
    }

    #[test]
    fn pieces_in_row_major_order() {
        let board = setup("4/1d2/4/1d2/1l2/4/4/2l1 l");
        assert_eq!(
            board
                .pieces(Color::Dark)
                .map(Piece::position)
                .collect::<Vec<_>>(),
            vec![Position::new(1, 1), Position::new(3, 1)]
        );
        assert_eq!(
            board
                .pieces(Color::Light)
                .map(Piece::position)
                .collect::<Vec<_>>(),
            vec![Position::new(4, 1), Position::new(7, 2)]
        );
    }

    #[test]
    fn bounds() {
        let board = Board::standard();
        assert!(board.is_valid(Position::new(7, 3)));
        assert!(!board.is_valid(Position::new(8, 0)));
        assert!(!board.is_valid(Position::new(0, 4)));
        assert_eq!(board.neighbor(Position::new(6, 3), Diagonal::TopRight), None);
        assert_eq!(board.neighbor(Position::new(7, 0), Diagonal::BottomRight), None);
        assert!(board.piece_at(Position::new(8, 0)).is_none());
    }

    #[test]
    fn advance() {
        let board = Board::standard();
        assert_eq!(board.advance(Color::Light), Diagonals::TOP);
        assert_eq!(board.advance(Color::Dark), Diagonals::BOTTOM);
    }
}
