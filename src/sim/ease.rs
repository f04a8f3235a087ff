//! Easing curves for the win celebration

use crate::config::EaseCurve;

/// Quadratic ease of `x` in [0, 1], clamped to [0, 1].
///
/// The literal curve is `min(1, max(0, x² · min(1, max(3, 3 - 2x))))`. The
/// inner factor always collapses to 1, so on [0, 1] this is plain `x²`.
#[inline]
pub fn quad_ease(x: f32) -> f32 {
    let linear = 1.0_f32.min(3.0_f32.max(3.0 - 2.0 * x));
    (x * x * linear).clamp(0.0, 1.0)
}

/// Smoothstep `x² (3 - 2x)`, clamped to [0, 1]
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

impl EaseCurve {
    /// Evaluate the selected curve
    #[inline]
    pub fn ease(self, x: f32) -> f32 {
        match self {
            EaseCurve::Literal => quad_ease(x),
            EaseCurve::Smoothstep => smoothstep(x),
        }
    }

    /// Perpetual back-and-forth swing around `angle_start`.
    ///
    /// Holds `angle_start` while `delay` is negative, eases out to
    /// `angle_start + swing` over the first quarter `interval`, then swings
    /// between `angle_start + swing` and `angle_start - swing`, one half
    /// `interval` per leg.
    pub fn ease_angle(self, delay: f32, interval: f32, angle_start: f32, swing: f32) -> f32 {
        if delay < 0.0 {
            return angle_start;
        }

        let quarter = interval / 4.0;
        if delay < quarter {
            return self.ease(delay / quarter) * swing + angle_start;
        }

        let phase = (delay - quarter) % interval;
        let half = interval / 2.0;
        if phase < half {
            return -2.0 * self.ease(phase / half) * swing + swing + angle_start;
        }

        2.0 * self.ease((phase - half) / half) * swing - swing + angle_start
    }
}

/// [`EaseCurve::ease_angle`] with the literal curve
#[inline]
pub fn quad_ease_angle(delay: f32, interval: f32, angle_start: f32, swing: f32) -> f32 {
    EaseCurve::Literal.ease_angle(delay, interval, angle_start, swing)
}
