//! Axis-aligned rectangles for the paddle, blocks and walls
//!
//! Coordinates are canvas-style: x grows right, y grows down, so `top_y`
//! is numerically smaller than `bottom_y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with its own velocity and an active flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedRect {
    pub left_x: f32,
    pub top_y: f32,
    pub right_x: f32,
    pub bottom_y: f32,
    /// Displacement applied per frame
    pub vel: Vec2,
    /// Inactive rectangles are skipped by collision and by the draw pass
    pub active: bool,
    /// 0.0 - 1.0
    pub opacity: f32,
}

impl BoundedRect {
    pub fn new(left_x: f32, top_y: f32, right_x: f32, bottom_y: f32) -> Self {
        debug_assert!(left_x <= right_x && top_y <= bottom_y);
        Self {
            left_x,
            top_y,
            right_x,
            bottom_y,
            vel: Vec2::ZERO,
            active: true,
            opacity: 1.0,
        }
    }

    /// Builder-style opacity override
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right_x - self.left_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_y - self.top_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left_x + self.right_x) / 2.0,
            (self.top_y + self.bottom_y) / 2.0,
        )
    }

    /// Move horizontally so the left edge sits at `left_x`, keeping the width
    pub fn set_left(&mut self, left_x: f32) {
        let width = self.width();
        self.left_x = left_x;
        self.right_x = left_x + width;
    }

    /// Move horizontally so the right edge sits at `right_x`, keeping the width
    pub fn set_right(&mut self, right_x: f32) {
        let width = self.width();
        self.right_x = right_x;
        self.left_x = right_x - width;
    }

    /// Advance by one frame of velocity
    pub fn integrate(&mut self) {
        self.left_x += self.vel.x;
        self.right_x += self.vel.x;
        self.top_y += self.vel.y;
        self.bottom_y += self.vel.y;
    }
}
