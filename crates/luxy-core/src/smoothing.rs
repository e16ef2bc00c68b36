//! Exponential smoothing and transform formatting.

use crate::constants::MAX_FRAME_GAP_MS;
use std::fmt;

/// One leaky-integrator step: move `current` toward `goal` by `rate` of the gap.
#[inline]
pub fn approach(current: f64, goal: f64, rate: f64) -> f64 {
    current + (goal - current) * rate
}

/// Nearest integer with halves going toward +inf, matching browsers' `Math.round`.
#[inline]
pub fn js_round(v: f64) -> f64 {
    let floor = v.floor();
    // v - floor is exact; v + 0.5 can round up to the next integer
    if v - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to two decimals the way `Math.round(v * 100) / 100` does.
#[inline]
pub fn round2(v: f64) -> f64 {
    let r = js_round(v * 100.0) / 100.0;
    // -0.0 would render as "-0px"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Per-frame `rate` rescaled to an arbitrary frame interval.
///
/// A rate tuned for `reference_fps` is applied `elapsed_ms * reference_fps / 1000`
/// times in closed form, so the same scroll settles in the same wall-clock time
/// on a 60 Hz and a 144 Hz display. Gaps longer than [`MAX_FRAME_GAP_MS`] are
/// clamped. Rates outside [0, 1] have no closed form and are returned unscaled.
pub fn scaled_rate(rate: f64, elapsed_ms: f64, reference_fps: f64) -> f64 {
    if !(0.0..=1.0).contains(&rate) {
        return rate;
    }
    let dt = elapsed_ms.clamp(0.0, MAX_FRAME_GAP_MS);
    let frames = dt * reference_fps / 1000.0;
    1.0 - (1.0 - rate).powf(frames)
}

/// A two-axis `translate3d` in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate3d {
    pub x: f64,
    pub y: f64,
}

impl Translate3d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Translate3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Wrapper transform for a smoothed offset: content moves up as the page scrolls down.
#[inline]
pub fn wrapper_transform(wrapper_offset: f64) -> Translate3d {
    Translate3d::new(0.0, round2(-wrapper_offset))
}
