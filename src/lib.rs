//! Heart Breakout - A single-screen emoji Breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, easing, game state machine)
//! - `session`: Host-facing controller (input commands, frame driving)
//! - `renderer`: Stateless draw pass plus a WebGPU vertex pipeline
//! - `platform`: Browser key mapping
//! - `config`: Immutable layout configuration

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{EaseCurve, GameConfig};
pub use error::GameError;
pub use session::{FrameClock, FrameStatus, GameSession, InputCommand};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 650.0;
    /// Spectator strip below the arena
    pub const CANVAS_EXTRA_HEIGHT: f32 = 100.0;
    pub const WALL_WIDTH: f32 = 20.0;

    /// Ball defaults (velocity in pixels per frame)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VX: f32 = 5.0;
    pub const BALL_START_VY: f32 = -5.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_TOP_Y: f32 = 580.0;
    pub const PADDLE_BOTTOM_Y: f32 = 600.0;
    pub const PADDLE_STEP: f32 = 10.0;
    pub const PADDLE_ANGLE_DEG: f32 = 90.0;

    /// Block grid defaults
    pub const BLOCK_SIDE: f32 = 40.0;
    pub const BLOCK_ROWS: u32 = 6;
    pub const BLOCK_PADDING: f32 = 2.0;
    pub const BLOCK_TOP_Y: f32 = 80.0;
    pub const BLOCK_OPACITY: f32 = 0.8;

    /// Spectator (panda/bunny/sweat) sizing
    pub const ACTOR_WIDTH: f32 = 50.0;
    pub const ACTOR_PADDING: f32 = 5.0;
    /// Lean applied to spectators while the paddle is steered (degrees)
    pub const ACTOR_LEAN_DEG: f32 = 22.5;

    /// Win celebration fade/glide duration (ms)
    pub const CELEBRATION_FADE_MS: f32 = 2000.0;
    /// Bobbing periods once the celebration settles (ms)
    pub const PANDA_BOB_MS: f32 = 3500.0;
    pub const BUNNY_BOB_MS: f32 = 5000.0;
    pub const PUFFIN_BOB_MS: f32 = 2000.0;
    pub const LEFT_HEART_BOB_MS: f32 = 4000.0;
    pub const RIGHT_HEART_BOB_MS: f32 = 5250.0;
    /// Ball spin period (ms)
    pub const BALL_SPIN_MS: f32 = 2000.0;
    /// Ball hue cycle period (ms)
    pub const BALL_HUE_CYCLE_MS: f32 = 6000.0;
    /// Resting angle of heart shapes (degrees, point down)
    pub const HEART_REST_ANGLE_DEG: f32 = -90.0;
}
