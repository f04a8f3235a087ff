//! CPU-side frame batch
//!
//! Collects triangles for the vertex pipeline and text runs for the host's
//! text layer. Reused across frames via [`VertexBatch::clear`].

use glam::Vec2;

use super::shapes::{self, HEART_SEGMENTS, with_alpha};
use super::vertex::Vertex;
use super::{Renderer, TextStyle};
use crate::sim::BoundedRect;

/// One queued piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub center_x: f32,
    pub top_y: f32,
    pub style: TextStyle,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
    pub text: Vec<TextRun>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.text.clear();
    }
}

impl Renderer for VertexBatch {
    fn fill_rect(&mut self, rect: &BoundedRect, color: [f32; 4], opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::rect(rect, with_alpha(color, opacity)));
    }

    fn stroke_rect(&mut self, rect: &BoundedRect, line_width: f32, color: [f32; 4], opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::rect_outline(
            rect,
            line_width,
            with_alpha(color, opacity),
        ));
    }

    fn fill_heart(&mut self, tip: Vec2, radius: f32, angle_deg: f32, color: [f32; 4], opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::heart(
            tip,
            radius,
            angle_deg,
            with_alpha(color, opacity),
            HEART_SEGMENTS,
        ));
    }

    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        top_y: f32,
        style: TextStyle,
        color: [f32; 4],
        opacity: f32,
    ) {
        if opacity <= 0.0 {
            return;
        }
        self.text.push(TextRun {
            text: text.to_owned(),
            center_x,
            top_y,
            style,
            color: with_alpha(color, opacity),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::{Palette, draw_scene};
    use crate::session::GameSession;

    #[test]
    fn test_transparent_calls_skipped() {
        let mut batch = VertexBatch::new();
        let r = BoundedRect::new(0.0, 0.0, 10.0, 10.0);
        batch.fill_rect(&r, [1.0; 4], 0.0);
        batch.fill_heart(Vec2::ZERO, 10.0, -90.0, [1.0; 4], 0.0);
        batch.draw_text("x", 0.0, 0.0, TextStyle::plain(10.0), [1.0; 4], 0.0);
        assert!(batch.vertices.is_empty());
        assert!(batch.text.is_empty());
    }

    #[test]
    fn test_opacity_applied() {
        let mut batch = VertexBatch::new();
        let r = BoundedRect::new(0.0, 0.0, 10.0, 10.0);
        batch.fill_rect(&r, [1.0; 4], 0.8);
        assert!(batch.vertices.iter().all(|v| (v.color[3] - 0.8).abs() < 1e-6));
    }

    #[test]
    fn test_scene_into_batch() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        let palette = Palette::new(7, session.state().total_blocks() as usize);
        let mut batch = VertexBatch::new();
        draw_scene(&session, &palette, &mut batch);

        assert!(!batch.vertices.is_empty());
        let glyphs: Vec<&str> = batch.text.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(glyphs, vec!["\u{1F43C}", "\u{1F430}", "Press space to start"]);

        batch.clear();
        assert!(batch.vertices.is_empty() && batch.text.is_empty());
    }
}
