//! Session controller
//!
//! The host owns one [`GameSession`]: it forwards discrete input commands
//! and calls [`GameSession::advance_frame`] once per display frame for as
//! long as the session reports it wants frames.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::sim::{Direction, GameEvent, GamePhase, GameState, press, release, tick};

/// Discrete input from the keyboard (or any other source)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    MoveLeftDown,
    MoveLeftUp,
    MoveRightDown,
    MoveRightUp,
    StartOrRestart,
}

/// Outcome of one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStatus {
    /// The host should schedule another frame
    pub keep_running: bool,
    pub events: Vec<GameEvent>,
}

/// Turns monotonically non-decreasing timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Delta since the previous sample; 0 for the first sample
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt as f32
    }

    /// Forget the previous sample so the next delta is 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// One running game: config, simulation state and frame clock
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    state: GameState,
    clock: FrameClock,
}

impl GameSession {
    /// Validate the config and lay out the first game in `Idle`
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let state = GameState::new(&config)?;
        log::info!(
            "Session ready: {}x{} arena, {} blocks, {} easing",
            config.arena_width,
            config.arena_height,
            state.total_blocks(),
            config.ease_curve.as_str()
        );
        Ok(Self {
            config,
            state,
            clock: FrameClock::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fully updated snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the host should keep driving frames
    pub fn wants_frames(&self) -> bool {
        self.state.phase.is_animating()
    }

    /// Replace every entity with a fresh layout. The phase returns to `Idle`.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.state = GameState::new(&self.config)?;
        self.clock.reset();
        Ok(())
    }

    /// Apply one input command. Movement only matters while playing; start
    /// is only honoured while not playing, rebuilding the world first if the
    /// previous game ended.
    pub fn apply_input(&mut self, command: InputCommand) -> Result<(), GameError> {
        match command {
            InputCommand::StartOrRestart => {
                if self.state.phase == GamePhase::Playing {
                    return Ok(());
                }
                if self.state.phase.has_ended() {
                    self.restart()?;
                }
                self.state.phase = GamePhase::Playing;
                self.clock.reset();
                log::info!("Game started");
            }
            InputCommand::MoveLeftDown => press(&mut self.state, &self.config, Direction::Left),
            InputCommand::MoveRightDown => press(&mut self.state, &self.config, Direction::Right),
            InputCommand::MoveLeftUp => release(&mut self.state, Direction::Left),
            InputCommand::MoveRightUp => release(&mut self.state, Direction::Right),
        }
        Ok(())
    }

    /// Advance one frame by `dt_ms` milliseconds
    pub fn advance_frame(&mut self, dt_ms: f32) -> FrameStatus {
        let events = tick(&mut self.state, &self.config, dt_ms.max(0.0));
        FrameStatus {
            keep_running: self.wants_frames(),
            events,
        }
    }

    /// Advance one frame using a host timestamp (ms)
    pub fn advance_to(&mut self, now_ms: f64) -> FrameStatus {
        let dt = self.clock.delta(now_ms);
        self.advance_frame(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.0), 16.0);
        // Non-monotonic sample clamps to zero
        assert_eq!(clock.delta(1010.0), 0.0);
        clock.reset();
        assert_eq!(clock.delta(5000.0), 0.0);
    }

    #[test]
    fn test_idle_is_quiescent() {
        let mut session = session();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(!session.wants_frames());

        let status = session.advance_frame(FRAME_MS);
        assert!(!status.keep_running);
        assert!(status.events.is_empty());
    }

    #[test]
    fn test_start_from_idle_keeps_layout() {
        let mut session = session();
        let before = session.state().clone();
        session.apply_input(InputCommand::StartOrRestart).unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state().blocks, before.blocks);
        assert!(session.advance_frame(FRAME_MS).keep_running);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut session = session();
        session.apply_input(InputCommand::StartOrRestart).unwrap();
        session.advance_frame(FRAME_MS);
        let pos = session.state().ball.pos;
        session.apply_input(InputCommand::StartOrRestart).unwrap();
        assert_eq!(session.state().ball.pos, pos);
        assert!(session.state().running_time > 0.0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = session();
        session.apply_input(InputCommand::StartOrRestart).unwrap();

        session.state.ball.pos = glam::Vec2::new(100.0, 622.0);
        session.state.ball.vel = glam::Vec2::new(0.0, 5.0);
        let status = session.advance_frame(FRAME_MS);
        assert!(!status.keep_running);
        assert_eq!(status.events, vec![GameEvent::GameOver]);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.apply_input(InputCommand::StartOrRestart).unwrap();
        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.running_time, 0.0);
        assert_eq!(
            state.active_blocks,
            session.config().block_columns() * session.config().block_rows
        );
        assert!(state.blocks.iter().all(|b| b.active));
    }

    #[test]
    fn test_restart_during_celebration() {
        let mut session = session();
        session.state.phase = GamePhase::Win;
        session.state.blocks.iter_mut().for_each(|b| b.active = false);
        session.state.active_blocks = 0;
        assert!(session.advance_frame(FRAME_MS).keep_running);

        session.apply_input(InputCommand::StartOrRestart).unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state().active_blocks, 54);
    }

    #[test]
    fn test_movement_commands() {
        let mut session = session();
        // Ignored while idle
        session.apply_input(InputCommand::MoveLeftDown).unwrap();
        assert!(session.state().pending_steer.is_none());

        session.apply_input(InputCommand::StartOrRestart).unwrap();
        session.apply_input(InputCommand::MoveLeftDown).unwrap();
        session.advance_frame(FRAME_MS);
        assert_eq!(session.state().paddle.vel.x, -10.0);
        assert_eq!(session.state().paddle.left_x, 190.0);

        session.apply_input(InputCommand::MoveRightUp).unwrap();
        session.advance_frame(FRAME_MS);
        assert_eq!(session.state().paddle.vel.x, -10.0);

        session.apply_input(InputCommand::MoveLeftUp).unwrap();
        session.advance_frame(FRAME_MS);
        assert_eq!(session.state().paddle.vel.x, 0.0);
    }

    #[test]
    fn test_advance_to_uses_clock() {
        let mut session = session();
        session.apply_input(InputCommand::StartOrRestart).unwrap();
        session.advance_to(10_000.0);
        assert_eq!(session.state().running_time, 0.0);
        session.advance_to(10_020.0);
        assert_eq!(session.state().running_time, 20.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            block_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(config),
            Err(GameError::EmptyBlockGrid { .. })
        ));
    }
}
