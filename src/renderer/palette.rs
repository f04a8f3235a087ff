//! Colors derived from hues
//!
//! The simulation never stores colors. Block hues come from a seeded RNG
//! here; the ball hue is a function of the running time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::BALL_HUE_CYCLE_MS;

/// Hue of the paddle (red-ish pastel)
pub const PADDLE_HUE: f32 = 0.0;
/// Hue of the walls (cyan pastel)
pub const WALL_HUE: f32 = 180.0;
/// Hue of the celebration hearts
pub const HEART_HUE: f32 = 0.0;

/// Convert HSL (hue in degrees, saturation and lightness in 0-1) to RGBA
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 4] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [r + m, g + m, b + m, 1.0]
}

/// Pastel fill used for rectangles
#[inline]
pub fn pastel(hue: f32) -> [f32; 4] {
    hsl_to_rgb(hue, 0.5, 0.75)
}

/// Ball color: full saturation, cycling through every hue every few seconds
pub fn ball_color(running_time: f32) -> [f32; 4] {
    let hue = 360.0 * (running_time % BALL_HUE_CYCLE_MS) / BALL_HUE_CYCLE_MS;
    hsl_to_rgb(hue, 1.0, 0.5)
}

/// Per-block hues, reshuffled on every new game
#[derive(Debug, Clone)]
pub struct Palette {
    rng: Pcg32,
    block_hues: Vec<f32>,
}

impl Palette {
    pub fn new(seed: u64, block_count: usize) -> Self {
        let mut palette = Self {
            rng: Pcg32::seed_from_u64(seed),
            block_hues: Vec::with_capacity(block_count),
        };
        palette.shuffle(block_count);
        palette
    }

    /// Draw fresh hues for `block_count` blocks
    pub fn shuffle(&mut self, block_count: usize) {
        self.block_hues.clear();
        for _ in 0..block_count {
            self.block_hues.push(self.rng.random_range(0.0..360.0));
        }
    }

    /// Fill color for the block at `index`
    pub fn block_color(&self, index: usize) -> [f32; 4] {
        let hue = self.block_hues.get(index).copied().unwrap_or(0.0);
        pastel(hue)
    }
}
