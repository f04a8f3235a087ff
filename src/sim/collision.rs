//! Circle-vs-rectangle collision detection and response
//!
//! The classifier clamps the circle center onto the rectangle and reports
//! which face the clamp landed on. It is only reliable while the ball moves
//! less than its radius per frame: a faster ball can tunnel through thin
//! geometry, and a ball whose center has already entered a rectangle is
//! reported as no collision at all.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::BoundedRect;

/// Face of a rectangle the circle touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Classify a circle against a rectangle.
///
/// Returns `None` for inactive rectangles, for circles farther than `radius`
/// from the rectangle, and for circles whose center lies inside it. When the
/// center is past a corner (both axes clamp) the vertical face wins.
pub fn classify_circle_rect(center: Vec2, radius: f32, rect: &BoundedRect) -> Option<Side> {
    if !rect.active {
        return None;
    }

    let mut test = center;
    let mut side = None;

    if center.x < rect.left_x {
        test.x = rect.left_x;
        side = Some(Side::Left);
    } else if center.x > rect.right_x {
        test.x = rect.right_x;
        side = Some(Side::Right);
    }

    // Vertical overrides horizontal on corners
    if center.y < rect.top_y {
        test.y = rect.top_y;
        side = Some(Side::Top);
    } else if center.y > rect.bottom_y {
        test.y = rect.bottom_y;
        side = Some(Side::Bottom);
    }

    if center.distance_squared(test) < radius * radius {
        side
    } else {
        None
    }
}

/// Reflect a velocity away from the touched face.
///
/// Only the sign of one component changes, so the magnitude is preserved.
#[inline]
pub fn bounce(vel: Vec2, side: Side) -> Vec2 {
    match side {
        Side::Top => Vec2::new(vel.x, -vel.y.abs()),
        Side::Bottom => Vec2::new(vel.x, vel.y.abs()),
        Side::Left => Vec2::new(-vel.x.abs(), vel.y),
        Side::Right => Vec2::new(vel.x.abs(), vel.y),
    }
}

/// Fraction of the paddle face where the ball landed, clamped to [0, 1]
#[inline]
pub fn percent_along(ball_x: f32, paddle: &BoundedRect, paddle_width: f32) -> f32 {
    ((ball_x - paddle.left_x) / paddle_width).clamp(0.0, 1.0)
}

/// Rebuild a velocity of magnitude `speed` leaving the paddle top.
///
/// `percent_along` 0.5 is straight up; the edges tilt by half of
/// `angle_range_deg` toward their own side.
pub fn paddle_deflection(speed: f32, percent_along: f32, angle_range_deg: f32) -> Vec2 {
    let angle = ((percent_along - 0.5) * angle_range_deg).to_radians();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> BoundedRect {
        BoundedRect::new(200.0, 580.0, 300.0, 600.0)
    }

    #[test]
    fn test_far_circle_misses() {
        assert_eq!(classify_circle_rect(Vec2::new(125.0, 487.5), 10.0, &paddle()), None);
    }

    #[test]
    fn test_each_face() {
        let rect = paddle();
        assert_eq!(
            classify_circle_rect(Vec2::new(250.0, 575.0), 10.0, &rect),
            Some(Side::Top)
        );
        assert_eq!(
            classify_circle_rect(Vec2::new(250.0, 605.0), 10.0, &rect),
            Some(Side::Bottom)
        );
        assert_eq!(
            classify_circle_rect(Vec2::new(195.0, 590.0), 10.0, &rect),
            Some(Side::Left)
        );
        assert_eq!(
            classify_circle_rect(Vec2::new(305.0, 590.0), 10.0, &rect),
            Some(Side::Right)
        );
    }

    #[test]
    fn test_touching_exactly_radius_is_miss() {
        // Strict less-than: a circle exactly `radius` away does not collide
        assert_eq!(classify_circle_rect(Vec2::new(250.0, 570.0), 10.0, &paddle()), None);
    }

    #[test]
    fn test_corner_prefers_vertical() {
        let rect = paddle();
        // Up-left of the top-left corner, within radius
        assert_eq!(
            classify_circle_rect(Vec2::new(196.0, 576.0), 10.0, &rect),
            Some(Side::Top)
        );
        // Down-right of the bottom-right corner
        assert_eq!(
            classify_circle_rect(Vec2::new(304.0, 604.0), 10.0, &rect),
            Some(Side::Bottom)
        );
        // Corner but too far away on the diagonal
        assert_eq!(classify_circle_rect(Vec2::new(192.0, 572.0), 10.0, &rect), None);
    }

    #[test]
    fn test_center_inside_is_not_detected() {
        assert_eq!(classify_circle_rect(Vec2::new(250.0, 590.0), 10.0, &paddle()), None);
    }

    #[test]
    fn test_inactive_rect_ignored() {
        let mut rect = paddle();
        rect.active = false;
        assert_eq!(classify_circle_rect(Vec2::new(250.0, 575.0), 10.0, &rect), None);
    }

    #[test]
    fn test_fast_ball_tunnels_thin_rect() {
        // A 4px-thick bar and a ball moving 30px per frame: the sampled
        // positions straddle the bar without ever overlapping it.
        let bar = BoundedRect::new(0.0, 100.0, 500.0, 104.0);
        let radius = 10.0;
        let mut pos = Vec2::new(250.0, 70.0);
        let vel = Vec2::new(0.0, 30.0);
        let mut hits = 0;
        for _ in 0..4 {
            if classify_circle_rect(pos, radius, &bar).is_some() {
                hits += 1;
            }
            pos += vel;
        }
        assert_eq!(hits, 0);
        assert!(pos.y > bar.bottom_y);
    }

    #[test]
    fn test_bounce_signs() {
        let vel = Vec2::new(5.0, -5.0);
        assert_eq!(bounce(vel, Side::Top), Vec2::new(5.0, -5.0));
        assert_eq!(bounce(vel, Side::Bottom), Vec2::new(5.0, 5.0));
        assert_eq!(bounce(vel, Side::Left), Vec2::new(-5.0, -5.0));
        assert_eq!(bounce(vel, Side::Right), Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_paddle_deflection_center_and_edges() {
        let speed = 50.0_f32.sqrt();

        let up = paddle_deflection(speed, 0.5, 90.0);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + speed).abs() < 1e-5);

        let left = paddle_deflection(speed, 0.0, 90.0);
        let right = paddle_deflection(speed, 1.0, 90.0);
        // Edges leave at 45 degrees from vertical
        assert!((left.x + 5.0).abs() < 1e-4);
        assert!((left.y + 5.0).abs() < 1e-4);
        assert!((right.x - 5.0).abs() < 1e-4);
        assert!((right.y + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_percent_along_clamps() {
        let rect = paddle();
        assert_eq!(percent_along(150.0, &rect, 100.0), 0.0);
        assert_eq!(percent_along(250.0, &rect, 100.0), 0.5);
        assert_eq!(percent_along(350.0, &rect, 100.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_far_circles_never_collide(
            left in -500.0f32..500.0,
            top in -500.0f32..500.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            radius in 1.0f32..30.0,
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 0.5f32..300.0,
        ) {
            let rect = BoundedRect::new(left, top, left + w, top + h);
            // Push the center out from the rectangle center past its half-diagonal
            let half_diag = (w * w + h * h).sqrt() / 2.0;
            let center = rect.center()
                + Vec2::new(angle.cos(), angle.sin()) * (half_diag + radius + extra);
            prop_assert_eq!(classify_circle_rect(center, radius, &rect), None);
        }

        #[test]
        fn prop_single_axis_side_matches_half_plane(
            x in 201.0f32..299.0,
            gap in 0.0f32..9.9,
        ) {
            let rect = paddle();
            prop_assert_eq!(
                classify_circle_rect(Vec2::new(x, rect.top_y - gap - 0.01), 10.0, &rect),
                Some(Side::Top)
            );
            prop_assert_eq!(
                classify_circle_rect(Vec2::new(x, rect.bottom_y + gap + 0.01), 10.0, &rect),
                Some(Side::Bottom)
            );
        }

        #[test]
        fn prop_corners_resolve_vertical(
            dx in 0.01f32..7.0,
            dy in 0.01f32..7.0,
        ) {
            let rect = paddle();
            // dx, dy < 7 keeps the diagonal under the radius of 10
            let side = classify_circle_rect(
                Vec2::new(rect.left_x - dx, rect.top_y - dy), 10.0, &rect);
            prop_assert_eq!(side, Some(Side::Top));
            let side = classify_circle_rect(
                Vec2::new(rect.right_x + dx, rect.bottom_y + dy), 10.0, &rect);
            prop_assert_eq!(side, Some(Side::Bottom));
        }

        #[test]
        fn prop_bounce_preserves_speed(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            which in 0usize..4,
        ) {
            let side = [Side::Top, Side::Bottom, Side::Left, Side::Right][which];
            let vel = Vec2::new(vx, vy);
            prop_assert!((bounce(vel, side).length() - vel.length()).abs() < 1e-4);
        }
    }
}
