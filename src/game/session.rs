//! Top-level game state: which color is active and whether the game runs.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::game::config::GameConfig;
use crate::game::notification::Notification;
use crate::game::turn::{Phase, TurnOrchestrator, TurnProgress};
use crate::rules::board::Board;
use crate::rules::core::{Color, Position};

/// Alternates turns between the two colors and forwards user intents to the
/// [`TurnOrchestrator`].
#[derive(Clone, Debug)]
pub struct GameSession {
    orchestrator: TurnOrchestrator,
    first_to_move: Color,
    active_color: Color,
    started: bool,
}

impl GameSession {
    /// Creates a session that is not started yet.
    #[must_use]
    pub fn new(board: Board, first_to_move: Color) -> Self {
        Self {
            orchestrator: TurnOrchestrator::new(board),
            first_to_move,
            active_color: first_to_move,
            started: false,
        }
    }

    /// Creates a session with the starting board described by `config`.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn from_config(config: &GameConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.starting_board()?, config.first_to_move))
    }

    /// Starts the game and the first turn. Starting a running game does
    /// nothing.
    pub fn start(&mut self) {
        if self.started {
            warn!("the game is already started");
            return;
        }
        self.started = true;
        self.active_color = self.first_to_move;
        info!(first = %self.active_color, "game started");
        self.orchestrator.begin_turn(self.active_color);
    }

    /// Stops the game. No more turns are started and intents are rejected
    /// until the next [`GameSession::start`].
    pub fn finish(&mut self) {
        if self.started {
            info!("game finished");
        }
        self.started = false;
        self.orchestrator.halt();
    }

    /// Forwards the selection intent.
    ///
    /// # Errors
    ///
    /// [`Error::NotStarted`] or [`Error::IllegalSelection`].
    pub fn select(&mut self, position: Position) -> Result<()> {
        self.ensure_started()?;
        self.orchestrator.select(position)
    }

    /// Forwards the cancellation intent.
    ///
    /// # Errors
    ///
    /// [`Error::NotStarted`].
    pub fn deselect(&mut self) -> Result<()> {
        self.ensure_started()?;
        self.orchestrator.deselect();
        Ok(())
    }

    /// Forwards the destination intent and starts the next turn for the
    /// other color once the current one ends.
    ///
    /// # Errors
    ///
    /// [`Error::NotStarted`] or [`Error::IllegalSelection`].
    pub fn choose_destination(&mut self, position: Position) -> Result<TurnProgress> {
        self.ensure_started()?;
        let progress = self.orchestrator.choose_destination(position)?;
        if progress == TurnProgress::Ended {
            self.active_color = !self.active_color;
            self.orchestrator.begin_turn(self.active_color);
        }
        Ok(progress)
    }

    /// Drains the notifications produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.orchestrator.take_notifications()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        self.orchestrator.board()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn active_color(&self) -> Color {
        self.active_color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Read access to the turn in progress.
    #[must_use]
    pub const fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    fn ensure_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            warn!("intent sent to a game that is not started");
            Err(Error::NotStarted)
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::notification::Mode;

    #[test]
    fn not_started() {
        let mut session = GameSession::new(Board::standard(), Color::Light);
        assert!(!session.is_started());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.select(Position::new(5, 0)), Err(Error::NotStarted));
        assert_eq!(session.deselect(), Err(Error::NotStarted));
        assert_eq!(
            session.choose_destination(Position::new(4, 0)),
            Err(Error::NotStarted)
        );
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn start_twice() {
        let mut session = GameSession::from_config(&GameConfig::default()).unwrap();
        session.start();
        assert_eq!(session.take_notifications().len(), 1);
        session.start();
        assert!(session.take_notifications().is_empty());
        assert_eq!(session.active_color(), Color::Light);
    }

    #[test]
    fn first_to_move() {
        let config = GameConfig {
            first_to_move: Color::Dark,
            ..GameConfig::default()
        };
        let mut session = GameSession::from_config(&config).unwrap();
        session.start();
        assert_eq!(session.active_color(), Color::Dark);
        assert_eq!(
            session.take_notifications(),
            vec![Notification::ActivatedPiecesChanged {
                mode: Mode::Move,
                positions: (0..4).map(|column| Position::new(2, column)).collect(),
            }]
        );
    }

    #[test]
    fn turns_alternate() {
        let mut session = GameSession::new(Board::standard(), Color::Light);
        session.start();
        session.select(Position::new(5, 1)).unwrap();
        assert_eq!(
            session.choose_destination(Position::new(4, 1)),
            Ok(TurnProgress::Ended)
        );
        assert_eq!(session.active_color(), Color::Dark);
        assert_eq!(session.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn finish() {
        let mut session = GameSession::new(Board::standard(), Color::Light);
        session.start();
        session.select(Position::new(5, 1)).unwrap();
        session.finish();
        assert!(!session.is_started());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(
            session.choose_destination(Position::new(4, 1)),
            Err(Error::NotStarted)
        );
        assert_eq!(session.board(), &Board::standard());
    }
}
