//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in [`GameState`]. A restart
//! throws the whole value away and builds a fresh one from the config.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::BoundedRect;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::GameError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Idle,
    /// Active gameplay
    Playing,
    /// Ball left through the bottom; waiting for restart
    GameOver,
    /// All blocks cleared; celebration runs until restart
    Win,
}

impl GamePhase {
    /// Whether the host should keep scheduling frames
    pub fn is_animating(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Win)
    }

    /// Whether a start input must rebuild the world first
    pub fn has_ended(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle top at this fraction of its width
    PaddleHit { percent_along: f32 },
    /// Block at this index was knocked out
    BlockDestroyed { index: usize },
    /// Ball reached the bottom boundary
    GameOver,
    /// Last block destroyed; show the win banner
    Won,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation; bounces only rotate `vel`
    pub speed: f32,
    pub radius: f32,
    /// Cosmetic spin (degrees)
    pub angle: f32,
    pub opacity: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            speed: vel.length(),
            radius,
            angle: HEART_REST_ANGLE_DEG,
            opacity: 1.0,
        }
    }

    /// Move one frame and spin once every `BALL_SPIN_MS`
    pub fn integrate(&mut self, running_time: f32) {
        self.pos += self.vel;
        self.angle = (running_time % BALL_SPIN_MS) / BALL_SPIN_MS * 360.0 + HEART_REST_ANGLE_DEG;
    }
}

/// A non-colliding heart shape shown during the celebration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub pos: Vec2,
    pub radius: f32,
    /// Degrees; -90 points the tip down
    pub angle: f32,
    pub opacity: f32,
}

/// Which spectator an [`Actor`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Puffin,
    Panda,
    Bunny,
    Sweat,
}

impl ActorKind {
    /// Emoji drawn for this actor
    pub fn glyph(self) -> &'static str {
        match self {
            ActorKind::Puffin => "\u{1F427}",
            ActorKind::Panda => "\u{1F43C}",
            ActorKind::Bunny => "\u{1F430}",
            ActorKind::Sweat => "\u{1F4A6}",
        }
    }
}

/// Decorative text prop. Never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    /// Horizontal center
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub height: f32,
    /// Degrees, rotated about the glyph center
    pub angle: f32,
    pub opacity: f32,
    pub active: bool,
    pub flipped_x: bool,
}

impl Actor {
    pub fn new(kind: ActorKind, x: f32, y: f32, height: f32, opacity: f32) -> Self {
        Self {
            kind,
            x,
            y,
            height,
            angle: 0.0,
            opacity,
            active: true,
            flipped_x: false,
        }
    }

    /// Fade in as blocks disappear: `((total - active) / total)²`
    pub fn track_progress(&mut self, active: u32, total: u32) {
        let cleared = (total - active) as f32 / total as f32;
        self.opacity = cleared * cleared;
    }
}

/// Direction of a held steering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Steering change buffered until the next frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steer {
    pub paddle_vx: f32,
    pub lean: Option<Direction>,
}

/// The four arena walls in fixed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    pub top: BoundedRect,
    pub right: BoundedRect,
    /// Its top face is the loss boundary
    pub bottom: BoundedRect,
    pub left: BoundedRect,
}

impl Walls {
    pub fn iter(&self) -> impl Iterator<Item = &BoundedRect> {
        [&self.top, &self.right, &self.bottom, &self.left].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BoundedRect> {
        [&mut self.top, &mut self.right, &mut self.bottom, &mut self.left].into_iter()
    }
}

/// Spectators below the arena plus the puffin behind the blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectators {
    pub puffin: Actor,
    pub panda: Actor,
    pub bunny: Actor,
    pub left_sweat: Actor,
    pub right_sweat: Actor,
    pub left_heart: Heart,
    pub right_heart: Heart,
}

impl Spectators {
    fn new(config: &GameConfig) -> Self {
        let w = config.arena_width;
        let canvas_h = config.canvas_height();
        let aw = config.actor_width;
        let ap = config.actor_padding;
        let floor_y = config.arena_height + 3.0 * ap;

        let sweat = |x: f32, flipped_x: bool| Actor {
            active: false,
            flipped_x,
            ..Actor::new(ActorKind::Sweat, x, floor_y, aw, 1.0)
        };
        let heart = |x: f32, y: f32| Heart {
            pos: Vec2::new(x, y),
            radius: w / 7.0,
            angle: HEART_REST_ANGLE_DEG,
            opacity: 0.0,
        };

        Self {
            puffin: Actor::new(
                ActorKind::Puffin,
                w / 2.0,
                config.block_top_y + config.block_side,
                (config.block_rows.saturating_sub(1)) as f32 * config.block_side,
                0.0,
            ),
            panda: Actor::new(ActorKind::Panda, w / 2.0 - aw / 2.0 - ap, floor_y, aw, 1.0),
            bunny: Actor::new(ActorKind::Bunny, w / 2.0 + aw / 2.0 + ap, floor_y, aw, 1.0),
            left_sweat: sweat(w / 2.0 - ap - aw - ap - aw / 2.0, true),
            right_sweat: sweat(w / 2.0 + ap + aw + ap + aw / 2.0, false),
            left_heart: heart(w / 5.0 * 2.0, canvas_h / 5.0 * 2.25),
            right_heart: heart(w / 5.0 * 4.0, canvas_h / 5.0 * 3.5),
        }
    }

    /// Tilt panda and bunny toward the steering direction and show one sweat drop
    pub fn lean(&mut self, lean: Option<Direction>) {
        let angle = match lean {
            Some(Direction::Left) => -ACTOR_LEAN_DEG,
            Some(Direction::Right) => ACTOR_LEAN_DEG,
            None => 0.0,
        };
        self.panda.angle = angle;
        self.bunny.angle = angle;
        self.left_sweat.active = lean == Some(Direction::Left);
        self.right_sweat.active = lean == Some(Direction::Right);
    }

    /// Actors drawn with text, in draw order
    pub fn actors(&self) -> [&Actor; 5] {
        [
            &self.puffin,
            &self.panda,
            &self.bunny,
            &self.left_sweat,
            &self.right_sweat,
        ]
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Milliseconds since the game started, or since the win while celebrating
    pub running_time: f32,
    pub ball: Ball,
    pub paddle: BoundedRect,
    pub walls: Walls,
    /// Column-major grid; destroyed blocks stay in place with `active == false`
    pub blocks: Vec<BoundedRect>,
    pub active_blocks: u32,
    pub spectators: Spectators,
    /// Steering input waiting for the next frame
    pub pending_steer: Option<Steer>,
}

impl GameState {
    /// Lay out a fresh game in the `Idle` phase.
    ///
    /// Fails if the config yields no blocks, since the win condition and
    /// the puffin fade both divide by the block count.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let columns = config.block_columns();
        if columns == 0 || config.block_rows == 0 {
            return Err(GameError::EmptyBlockGrid {
                columns,
                rows: config.block_rows,
            });
        }

        let w = config.arena_width;
        let h = config.arena_height;
        let ww = config.wall_width;

        let ball = Ball::new(
            Vec2::new(w / 4.0, h * 3.0 / 4.0),
            Vec2::new(config.ball_start_vx, config.ball_start_vy),
            config.ball_radius,
        );

        let paddle = BoundedRect::new(
            (w - config.paddle_width) / 2.0,
            config.paddle_top_y,
            (w + config.paddle_width) / 2.0,
            config.paddle_bottom_y,
        );

        let walls = Walls {
            top: BoundedRect::new(0.0, 0.0, w, ww),
            right: BoundedRect::new(w - ww, 0.0, w, h),
            bottom: BoundedRect::new(0.0, h - ww, w, h),
            left: BoundedRect::new(0.0, 0.0, ww, h),
        };

        let blocks = block_grid(config);
        let active_blocks = blocks.len() as u32;

        log::debug!(
            "Laid out {} blocks ({} x {})",
            active_blocks,
            columns,
            config.block_rows
        );

        Ok(Self {
            phase: GamePhase::Idle,
            running_time: 0.0,
            ball,
            paddle,
            walls,
            blocks,
            active_blocks,
            spectators: Spectators::new(config),
            pending_steer: None,
        })
    }

    /// Number of blocks laid out at restart
    #[inline]
    pub fn total_blocks(&self) -> u32 {
        self.blocks.len() as u32
    }

    /// Paddle velocity as the next frame will see it
    pub fn effective_paddle_vx(&self) -> f32 {
        self.pending_steer
            .map(|s| s.paddle_vx)
            .unwrap_or(self.paddle.vel.x)
    }
}

/// Build the block grid: `columns` x `rows`, centered, padded inside each cell
fn block_grid(config: &GameConfig) -> Vec<BoundedRect> {
    let columns = config.block_columns();
    let left = config.block_grid_left();
    let side = config.block_side;
    let pad = config.block_padding;
    let top = config.block_top_y;

    let mut blocks = Vec::with_capacity((columns * config.block_rows) as usize);
    for i in 0..columns {
        for j in 0..config.block_rows {
            let (i, j) = (i as f32, j as f32);
            blocks.push(
                BoundedRect::new(
                    left + i * side + pad,
                    top + j * side + pad,
                    left + (i + 1.0) * side - pad,
                    top + (j + 1.0) * side - pad,
                )
                .with_opacity(BLOCK_OPACITY),
            );
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let config = GameConfig::default();
        let state = GameState::new(&config).expect("default config is valid");

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.running_time, 0.0);
        assert_eq!(state.ball.pos, Vec2::new(125.0, 487.5));
        assert_eq!(state.ball.vel, Vec2::new(5.0, -5.0));
        assert!((state.ball.speed - 50.0_f32.sqrt()).abs() < 1e-6);

        assert_eq!(
            (state.paddle.left_x, state.paddle.right_x),
            (200.0, 300.0)
        );
        assert_eq!(
            (state.paddle.top_y, state.paddle.bottom_y),
            (580.0, 600.0)
        );

        assert_eq!(state.walls.bottom.top_y, 630.0);
        assert_eq!(state.walls.right.left_x, 480.0);
    }

    #[test]
    fn test_block_grid_positions() {
        let config = GameConfig::default();
        let state = GameState::new(&config).unwrap();

        assert_eq!(state.total_blocks(), config.block_columns() * BLOCK_ROWS);
        assert_eq!(state.active_blocks, 54);
        assert!(state.blocks.iter().all(|b| b.active));
        assert!(state.blocks.iter().all(|b| b.opacity == BLOCK_OPACITY));

        // First block: column 0, row 0
        let first = &state.blocks[0];
        assert_eq!(
            (first.left_x, first.top_y, first.right_x, first.bottom_y),
            (72.0, 82.0, 108.0, 118.0)
        );
        // Column-major: index 1 is the row below
        assert_eq!(state.blocks[1].top_y, 122.0);
        assert_eq!(state.blocks[1].left_x, 72.0);
        // Last block: column 8, row 5
        let last = state.blocks.last().unwrap();
        assert_eq!(
            (last.left_x, last.top_y, last.right_x, last.bottom_y),
            (392.0, 282.0, 428.0, 318.0)
        );
    }

    #[test]
    fn test_empty_grid_rejected() {
        let config = GameConfig {
            block_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(&config),
            Err(GameError::EmptyBlockGrid { .. })
        ));
    }

    #[test]
    fn test_spectators_start_positions() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        let s = &state.spectators;

        assert_eq!((s.puffin.x, s.puffin.y, s.puffin.height), (250.0, 120.0, 200.0));
        assert_eq!(s.puffin.opacity, 0.0);
        assert_eq!((s.panda.x, s.panda.y), (220.0, 665.0));
        assert_eq!((s.bunny.x, s.bunny.y), (280.0, 665.0));
        assert_eq!(s.left_sweat.x, 165.0);
        assert_eq!(s.right_sweat.x, 335.0);
        assert!(!s.left_sweat.active && !s.right_sweat.active);
        assert!(s.left_sweat.flipped_x && !s.right_sweat.flipped_x);
        assert_eq!(s.left_heart.pos, Vec2::new(200.0, 337.5));
        assert_eq!(s.right_heart.opacity, 0.0);
    }

    #[test]
    fn test_puffin_progress_opacity() {
        let mut actor = Actor::new(ActorKind::Puffin, 0.0, 0.0, 10.0, 0.0);
        actor.track_progress(54, 54);
        assert_eq!(actor.opacity, 0.0);
        actor.track_progress(27, 54);
        assert_eq!(actor.opacity, 0.25);
        actor.track_progress(0, 54);
        assert_eq!(actor.opacity, 1.0);
    }

    #[test]
    fn test_lean() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.spectators.lean(Some(Direction::Left));
        assert_eq!(state.spectators.panda.angle, -22.5);
        assert!(state.spectators.left_sweat.active);
        assert!(!state.spectators.right_sweat.active);

        state.spectators.lean(None);
        assert_eq!(state.spectators.bunny.angle, 0.0);
        assert!(!state.spectators.left_sweat.active);
    }

    #[test]
    fn test_ball_spin() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(1.0, 2.0), 10.0);
        ball.integrate(500.0);
        assert_eq!(ball.pos, Vec2::new(1.0, 2.0));
        assert_eq!(ball.angle, 0.0);
        ball.integrate(2500.0);
        assert_eq!(ball.angle, 0.0);
    }
}
