//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixel coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::BoundedRect;

/// Segments used to tessellate a heart outline
pub const HEART_SEGMENTS: u32 = 48;

/// Scale a color's alpha by `opacity`
#[inline]
pub fn with_alpha(color: [f32; 4], opacity: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * opacity.clamp(0.0, 1.0)]
}

fn quad(out: &mut Vec<Vertex>, x0: f32, y0: f32, x1: f32, y1: f32, color: [f32; 4]) {
    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y1, color));
    out.push(Vertex::new(x0, y1, color));
}

/// Solid rectangle
pub fn rect(r: &BoundedRect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, r.left_x, r.top_y, r.right_x, r.bottom_y, color);
    vertices
}

/// Rectangle outline centered on the edges, `line_width` thick
pub fn rect_outline(r: &BoundedRect, line_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if line_width <= 0.0 {
        return Vec::new();
    }
    let h = line_width / 2.0;
    let mut vertices = Vec::with_capacity(24);
    // Top and bottom span the full width including corners
    quad(&mut vertices, r.left_x - h, r.top_y - h, r.right_x + h, r.top_y + h, color);
    quad(&mut vertices, r.left_x - h, r.bottom_y - h, r.right_x + h, r.bottom_y + h, color);
    quad(&mut vertices, r.left_x - h, r.top_y + h, r.left_x + h, r.bottom_y - h, color);
    quad(&mut vertices, r.right_x - h, r.top_y + h, r.right_x + h, r.bottom_y - h, color);
    vertices
}

/// Point on the classic parametric heart, tip at the origin, lobes along +y.
/// Lobes reach about 29 units from the tip.
fn heart_point(t: f32) -> Vec2 {
    let s = t.sin();
    let x = 16.0 * s * s * s;
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x, y + 17.0)
}

/// Filled heart whose tip sits on `tip` and whose lobes point toward
/// `angle_deg` (canvas degrees, -90 is up), reaching `radius` from the tip.
pub fn heart(tip: Vec2, radius: f32, angle_deg: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(8);
    let scale = radius / 29.0;
    let theta = angle_deg.to_radians();
    let up = Vec2::new(theta.cos(), theta.sin());
    let side = Vec2::new(-up.y, up.x);

    let to_canvas = |p: Vec2| tip + up * (p.y * scale) + side * (p.x * scale);
    // The heart is star-shaped around a point between the tip and the cleft
    let hub = to_canvas(Vec2::new(0.0, 12.0));

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let t1 = (i as f32 / segments as f32) * 2.0 * PI;
        let t2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = to_canvas(heart_point(t1));
        let p2 = to_canvas(heart_point(t2));

        vertices.push(Vertex::new(hub.x, hub.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_bounds() {
        let r = BoundedRect::new(10.0, 20.0, 30.0, 50.0);
        let v = rect(&r, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 30.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 50.0);
    }

    #[test]
    fn test_outline_width() {
        let r = BoundedRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_outline(&r, 0.0, [1.0; 4]).is_empty());
        let v = rect_outline(&r, 2.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        let min_x = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert_eq!(min_x, -1.0);
    }

    #[test]
    fn test_heart_upright() {
        let tip = Vec2::new(100.0, 100.0);
        let v = heart(tip, 29.0, -90.0, [1.0; 4], HEART_SEGMENTS);
        assert_eq!(v.len(), (HEART_SEGMENTS * 3) as usize);
        // Lobes point up on the canvas (smaller y), nothing hangs below the tip
        let min_y = v.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!(min_y < 75.0);
        assert!(max_y <= 100.0 + 1e-3);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha([1.0, 0.5, 0.25, 1.0], 0.5), [1.0, 0.5, 0.25, 0.5]);
        assert_eq!(with_alpha([1.0; 4], 2.0)[3], 1.0);
    }
}
