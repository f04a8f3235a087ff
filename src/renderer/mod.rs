//! Rendering
//!
//! [`draw_scene`] walks a [`GameSession`] snapshot and issues draw calls to
//! any [`Renderer`]. [`VertexBatch`] turns those calls into triangles for the
//! WebGPU pipeline and queues text for the host's text layer.

pub mod batch;
pub mod palette;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use batch::{TextRun, VertexBatch};
pub use palette::Palette;
pub use pipeline::RenderState;

use crate::config::GameConfig;
use crate::session::GameSession;
use crate::sim::{Actor, BoundedRect, GamePhase};
use palette::{HEART_HUE, PADDLE_HUE, WALL_HUE, ball_color, hsl_to_rgb, pastel};
use vertex::colors;

/// Line width of block and paddle outlines
const OUTLINE_WIDTH: f32 = 1.0;
/// Prompt text height (48pt)
const PROMPT_HEIGHT: f32 = 64.0;
/// "Game over" baseline sits this far above the start prompt's
const GAME_OVER_RISE: f32 = 72.0;

/// How a run of text is laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph height in pixels
    pub height: f32,
    /// Rotation about the text center
    pub angle_deg: f32,
    /// Mirror horizontally
    pub flipped_x: bool,
    /// Squeeze the run to fit this width
    pub max_width: Option<f32>,
}

impl TextStyle {
    pub fn plain(height: f32) -> Self {
        Self {
            height,
            angle_deg: 0.0,
            flipped_x: false,
            max_width: None,
        }
    }
}

/// Drawing surface used by [`draw_scene`]
pub trait Renderer {
    fn fill_rect(&mut self, rect: &BoundedRect, color: [f32; 4], opacity: f32);

    fn stroke_rect(&mut self, rect: &BoundedRect, line_width: f32, color: [f32; 4], opacity: f32);

    /// Heart with its tip at `tip`, lobes toward `angle_deg`
    fn fill_heart(&mut self, tip: Vec2, radius: f32, angle_deg: f32, color: [f32; 4], opacity: f32);

    /// Text horizontally centered on `center_x` with its top edge at `top_y`
    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        top_y: f32,
        style: TextStyle,
        color: [f32; 4],
        opacity: f32,
    );
}

fn draw_actor(actor: &Actor, out: &mut impl Renderer) {
    if !actor.active || actor.opacity <= 0.0 {
        return;
    }
    let style = TextStyle {
        height: actor.height,
        angle_deg: actor.angle,
        flipped_x: actor.flipped_x,
        max_width: None,
    };
    out.draw_text(
        actor.kind.glyph(),
        actor.x,
        actor.y,
        style,
        colors::TEXT,
        actor.opacity,
    );
}

/// Text shown while the session waits for the start key, with the top edge
/// of each line. The start prompt's baseline sits two thirds down the arena.
pub fn prompt_layout(phase: GamePhase, config: &GameConfig) -> Vec<(&'static str, f32)> {
    let baseline = config.arena_height / 3.0 * 2.0;
    let start = ("Press space to start", baseline - PROMPT_HEIGHT);
    match phase {
        GamePhase::Idle => vec![start],
        GamePhase::GameOver => vec![
            start,
            ("Game over", baseline - GAME_OVER_RISE - PROMPT_HEIGHT),
        ],
        GamePhase::Playing | GamePhase::Win => Vec::new(),
    }
}

/// Draw the whole scene for the current snapshot
pub fn draw_scene(session: &GameSession, palette: &Palette, out: &mut impl Renderer) {
    let state = session.state();
    let config = session.config();

    let ball = &state.ball;
    out.fill_heart(
        ball.pos,
        ball.radius,
        ball.angle,
        ball_color(state.running_time),
        ball.opacity,
    );

    if state.phase == GamePhase::Win {
        let heart_color = hsl_to_rgb(HEART_HUE, 1.0, 0.5);
        for heart in [&state.spectators.left_heart, &state.spectators.right_heart] {
            out.fill_heart(heart.pos, heart.radius, heart.angle, heart_color, heart.opacity);
        }
    }

    let paddle = &state.paddle;
    out.fill_rect(paddle, pastel(PADDLE_HUE), paddle.opacity);
    out.stroke_rect(paddle, OUTLINE_WIDTH, colors::OUTLINE, paddle.opacity);

    for wall in state.walls.iter() {
        out.fill_rect(wall, pastel(WALL_HUE), wall.opacity);
    }

    for (index, block) in state.blocks.iter().enumerate() {
        if !block.active {
            continue;
        }
        out.fill_rect(block, palette.block_color(index), block.opacity);
        out.stroke_rect(block, OUTLINE_WIDTH, colors::OUTLINE, block.opacity);
    }

    for actor in state.spectators.actors() {
        draw_actor(actor, out);
    }

    let style = TextStyle {
        max_width: Some(config.arena_width - 2.0 * config.wall_width - 20.0),
        ..TextStyle::plain(PROMPT_HEIGHT)
    };
    for (line, top_y) in prompt_layout(state.phase, config) {
        out.draw_text(line, config.arena_width / 2.0, top_y, style, colors::TEXT, 1.0);
    }
}
