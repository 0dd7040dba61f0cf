//! The engine puts all pieces together behind a line-oriented text protocol,
//! so that a presentation layer (or a human in a terminal) can drive a game
//! through stdin and stdout.
//!
//! [`Engine::protocol_loop`] is the "main loop" of the engine which
//! communicates with the environment and executes commands from the input
//! stream. Notifications produced by the game are written one per line right
//! after the command that triggered them.
use std::io::{BufRead, Write};

use anyhow::Context;

use crate::engine::protocol::Command;
use crate::error::Error;
use crate::game::config::GameConfig;
use crate::game::session::GameSession;
use crate::rules::board::Board;
use crate::rules::core::Position;

mod protocol;

/// The Engine connects everything together, handles commands sent by the
/// collaborator, including I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    config: GameConfig,
    session: Option<GameSession>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with default configuration and
    /// provided I/O. No game is in progress until `newgame` or `position`.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            config: GameConfig::default(),
            session: None,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes sent commands until
    /// "quit" is sent or the input is closed.
    ///
    /// A command that can not be executed (malformed layout, illegal
    /// selection, bad option value) is reported with an `info string` line
    /// and the loop keeps reading.
    ///
    /// # Errors
    ///
    /// If reading the input or writing the output fails.
    pub fn protocol_loop(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self
                .input
                .read_line(&mut line)
                .context("reading the input stream")?
                == 0
            {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let result = match Command::parse(&line) {
                Command::Identify => self.handle_identify(),
                Command::IsReady => self.handle_isready(),
                Command::SetOption { name, value } => self.config.set_option(&name, &value),
                Command::NewGame => self.handle_newgame(),
                Command::SetPosition { layout } => self.handle_position(layout.as_deref()),
                Command::Select(position) => self.handle_select(&position),
                Command::Deselect => self.handle_deselect(),
                Command::To(position) => self.handle_to(&position),
                Command::Finish => self.handle_finish(),
                Command::Debug => self.handle_debug(),
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")
                        .map_err(anyhow::Error::from)
                },
            };
            if let Err(e) = result {
                writeln!(self.output, "info string {e:#}")?;
            }
            self.output.flush()?;
        }
        Ok(())
    }

    /// Responds to the `identify` handshake command by identifying the
    /// engine.
    fn handle_identify(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::engine_version()
        )?;
        writeln!(self.output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(self.output, "identifyok")?;
        Ok(())
    }

    /// Syncs with the collaborator by responding with `readyok`.
    fn handle_isready(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "readyok")?;
        Ok(())
    }

    /// Starts a new game with the configured starting board.
    fn handle_newgame(&mut self) -> anyhow::Result<()> {
        let session = GameSession::from_config(&self.config)?;
        self.start(session)
    }

    /// Starts a new game from the starting board or the given layout.
    fn handle_position(&mut self, layout: Option<&str>) -> anyhow::Result<()> {
        let board = match layout {
            Some(layout) => Board::try_from(layout)?,
            None => self.config.starting_board()?,
        };
        self.start(GameSession::new(board, self.config.first_to_move))
    }

    fn handle_select(&mut self, position: &str) -> anyhow::Result<()> {
        let position = Position::try_from(position)?;
        self.session_mut()?.select(position)?;
        self.write_notifications()
    }

    fn handle_deselect(&mut self) -> anyhow::Result<()> {
        self.session_mut()?.deselect()?;
        self.write_notifications()
    }

    fn handle_to(&mut self, position: &str) -> anyhow::Result<()> {
        let position = Position::try_from(position)?;
        let _ = self.session_mut()?.choose_destination(position)?;
        self.write_notifications()
    }

    fn handle_finish(&mut self) -> anyhow::Result<()> {
        self.session_mut()?.finish();
        Ok(())
    }

    /// Prints the board grid, its layout and the active color.
    fn handle_debug(&mut self) -> anyhow::Result<()> {
        let session = self.session.as_ref().ok_or(Error::NotStarted)?;
        writeln!(self.output, "{:?}", session.board())?;
        writeln!(self.output, "Layout: {}", session.board())?;
        writeln!(self.output, "Active: {}", session.active_color())?;
        Ok(())
    }

    fn start(&mut self, mut session: GameSession) -> anyhow::Result<()> {
        session.start();
        self.session = Some(session);
        self.write_notifications()
    }

    fn session_mut(&mut self) -> anyhow::Result<&mut GameSession> {
        Ok(self.session.as_mut().ok_or(Error::NotStarted)?)
    }

    fn write_notifications(&mut self) -> anyhow::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        for notification in session.take_notifications() {
            writeln!(self.output, "{notification}")?;
        }
        Ok(())
    }
}
