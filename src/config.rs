//! Game configuration
//!
//! One immutable value handed to the session at construction. Defaults
//! reproduce the classic layout; a JSON override can be stored in
//! LocalStorage on the web build.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Which easing curve drives the win celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EaseCurve {
    /// `min(1, max(0, x² · min(1, max(3, 3 - 2x))))`, the observed timing
    #[default]
    Literal,
    /// `x² · (3 - 2x)`, a smoothstep taper near x = 1
    Smoothstep,
}

impl EaseCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            EaseCurve::Literal => "literal",
            EaseCurve::Smoothstep => "smoothstep",
        }
    }

}

impl FromStr for EaseCurve {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(EaseCurve::Literal),
            "smoothstep" | "smooth" => Ok(EaseCurve::Smoothstep),
            other => Err(GameError::InvalidConfig(format!(
                "unknown ease curve '{}'",
                other
            ))),
        }
    }
}

/// Arena, entity and celebration layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Extra space below the arena where the spectators sit
    pub canvas_extra_height: f32,
    pub wall_width: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_vx: f32,
    pub ball_start_vy: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_top_y: f32,
    pub paddle_bottom_y: f32,
    /// Horizontal speed while a direction is held (pixels per frame)
    pub paddle_step: f32,
    /// Full deflection range across the paddle face (degrees)
    pub paddle_angle_deg: f32,

    // === Blocks ===
    pub block_side: f32,
    pub block_rows: u32,
    pub block_padding: f32,
    pub block_top_y: f32,

    // === Spectators ===
    pub actor_width: f32,
    pub actor_padding: f32,

    // === Celebration ===
    /// Length of the fade/glide transition after a win (ms)
    pub celebration_fade_ms: f32,
    pub ease_curve: EaseCurve,
    /// Full swing periods of the bobbing that follows the transition (ms)
    pub panda_bob_ms: f32,
    pub bunny_bob_ms: f32,
    pub puffin_bob_ms: f32,
    pub left_heart_bob_ms: f32,
    pub right_heart_bob_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            canvas_extra_height: CANVAS_EXTRA_HEIGHT,
            wall_width: WALL_WIDTH,

            ball_radius: BALL_RADIUS,
            ball_start_vx: BALL_START_VX,
            ball_start_vy: BALL_START_VY,

            paddle_width: PADDLE_WIDTH,
            paddle_top_y: PADDLE_TOP_Y,
            paddle_bottom_y: PADDLE_BOTTOM_Y,
            paddle_step: PADDLE_STEP,
            paddle_angle_deg: PADDLE_ANGLE_DEG,

            block_side: BLOCK_SIDE,
            block_rows: BLOCK_ROWS,
            block_padding: BLOCK_PADDING,
            block_top_y: BLOCK_TOP_Y,

            actor_width: ACTOR_WIDTH,
            actor_padding: ACTOR_PADDING,

            celebration_fade_ms: CELEBRATION_FADE_MS,
            ease_curve: EaseCurve::Literal,
            panda_bob_ms: PANDA_BOB_MS,
            bunny_bob_ms: BUNNY_BOB_MS,
            puffin_bob_ms: PUFFIN_BOB_MS,
            left_heart_bob_ms: LEFT_HEART_BOB_MS,
            right_heart_bob_ms: RIGHT_HEART_BOB_MS,
        }
    }
}

impl GameConfig {
    /// Height of the whole drawing surface (arena plus spectator strip)
    #[inline]
    pub fn canvas_height(&self) -> f32 {
        self.arena_height + self.canvas_extra_height
    }

    /// Number of block columns that fit between the walls, leaving room for the ball
    pub fn block_columns(&self) -> u32 {
        let usable = self.arena_width - 2.0 * self.wall_width - 8.0 * self.ball_radius - 20.0;
        if usable <= 0.0 || self.block_side <= 0.0 {
            return 0;
        }
        (usable / self.block_side).floor() as u32
    }

    /// Total number of blocks laid out on restart
    pub fn block_count(&self) -> u32 {
        self.block_columns() * self.block_rows
    }

    /// Left edge of the horizontally centered block grid
    pub fn block_grid_left(&self) -> f32 {
        let total = self.block_columns() as f32 * self.block_side;
        (self.arena_width / 2.0 - total / 2.0).trunc()
    }

    /// Check the layout can produce a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        if self.ball_radius <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "ball radius must be positive, got {}",
                self.ball_radius
            )));
        }
        if self.paddle_width <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "paddle width must be positive, got {}",
                self.paddle_width
            )));
        }
        if self.paddle_width > self.arena_width - 2.0 * self.wall_width - 2.0 {
            return Err(GameError::InvalidConfig(format!(
                "paddle width {} does not fit between the walls",
                self.paddle_width
            )));
        }
        if self.paddle_top_y > self.paddle_bottom_y {
            return Err(GameError::InvalidConfig(
                "paddle top is below paddle bottom".to_string(),
            ));
        }
        if self.celebration_fade_ms <= 0.0 {
            return Err(GameError::InvalidConfig(
                "celebration fade must be positive".to_string(),
            ));
        }
        let bob_periods = [
            self.panda_bob_ms,
            self.bunny_bob_ms,
            self.puffin_bob_ms,
            self.left_heart_bob_ms,
            self.right_heart_bob_ms,
        ];
        if bob_periods.iter().any(|&ms| ms <= 0.0) {
            return Err(GameError::InvalidConfig(
                "bobbing periods must be positive".to_string(),
            ));
        }
        if self.block_count() == 0 {
            return Err(GameError::EmptyBlockGrid {
                columns: self.block_columns(),
                rows: self.block_rows,
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the full config, every field spelled out
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_breakout_config";

    /// Load config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Config saved");
                }
                Err(e) => log::warn!("Config not saved: {}", e),
            }
        }
    }
}
