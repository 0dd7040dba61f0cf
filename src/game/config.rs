//! Board geometry and starting parameters of a game.

use anyhow::{bail, Context};

use crate::rules::board::{Board, DEFAULT_ROWS_PER_SIDE};
use crate::rules::core::{Color, DEFAULT_EDGE_SIZE, MAX_EDGE_SIZE, MIN_EDGE_SIZE};

/// Parameters of a new game. Defaults describe English draughts: 8x8 board,
/// three rows per side, Light at the bottom and moving first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of rows and grid columns.
    pub edge_size: u8,
    /// Rows each side fills in the starting position.
    pub rows_per_side: u8,
    #[allow(missing_docs)]
    pub first_to_move: Color,
    /// Color whose camp is at the bottom of the board.
    pub bottom: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            edge_size: DEFAULT_EDGE_SIZE,
            rows_per_side: DEFAULT_ROWS_PER_SIDE,
            first_to_move: Color::Light,
            bottom: Color::Light,
        }
    }
}

impl GameConfig {
    /// Checks that the starting board can be built.
    ///
    /// # Errors
    ///
    /// If the edge size is odd or out of bounds, or the camps do not fit.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.edge_size % 2 != 0
            || !(MIN_EDGE_SIZE..=MAX_EDGE_SIZE).contains(&self.edge_size)
        {
            bail!(
                "EdgeSize should be an even number within {MIN_EDGE_SIZE}..={MAX_EDGE_SIZE}, got {}",
                self.edge_size
            );
        }
        if self.rows_per_side == 0 {
            bail!("Rows should be positive");
        }
        if u16::from(self.rows_per_side) * 2 >= u16::from(self.edge_size) {
            bail!(
                "Rows should leave at least one empty row pair: {} rows per side on a board with edge size {}",
                self.rows_per_side,
                self.edge_size
            );
        }
        Ok(())
    }

    /// Updates a single option by its protocol name. The option is only
    /// applied if the resulting configuration is valid.
    ///
    /// # Errors
    ///
    /// If the name is unknown, the value can not be parsed or the resulting
    /// configuration is invalid.
    pub fn set_option(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        let mut updated = *self;
        match name {
            "EdgeSize" => {
                updated.edge_size = value
                    .parse()
                    .with_context(|| format!("EdgeSize should be a number, got '{value}'"))?;
            },
            "Rows" => {
                updated.rows_per_side = value
                    .parse()
                    .with_context(|| format!("Rows should be a number, got '{value}'"))?;
            },
            "FirstToMove" => updated.first_to_move = Color::try_from(value)?,
            "Bottom" => updated.bottom = Color::try_from(value)?,
            _ => bail!("unknown option: {name}"),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Builds the starting board described by this configuration.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn starting_board(&self) -> anyhow::Result<Board> {
        self.validate()?;
        Board::starting(self.edge_size, self.rows_per_side, self.bottom)
    }
}
