//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Positions advance a fixed step per frame
//! - Elapsed time only drives cosmetic timelines
//! - Stable iteration order (blocks in grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod ease;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Side, bounce, classify_circle_rect, paddle_deflection, percent_along};
pub use ease::{quad_ease, quad_ease_angle, smoothstep};
pub use rect::BoundedRect;
pub use state::{
    Actor, ActorKind, Ball, Direction, GameEvent, GamePhase, GameState, Heart, Spectators, Steer,
    Walls,
};
pub use tick::{paddle_offset, press, release, tick};
