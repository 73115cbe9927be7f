//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame timing (host timestamps → whole-millisecond engine steps)
//! - Browser bindings (wasm32)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Largest integer a JS number holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Convert a seed passed in as a JS number
///
/// Only whole numbers in `0..=Number.MAX_SAFE_INTEGER` are accepted; anything
/// else would collapse onto some other seed when cast.
pub fn seed_from_js(seed: f64) -> Option<u64> {
    if seed.is_finite() && seed.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(&seed) {
        Some(seed as u64)
    } else {
        None
    }
}

/// Turns host frame timestamps into engine steps
///
/// Hosts report fractional milliseconds (requestAnimationFrame, Instant);
/// the engine clock counts whole ones. Fractions carry over so no time is
/// lost across frames. Long gaps are not clamped: a wheel left in a
/// background tab still resolves on the next frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    carry_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole milliseconds elapsed since the previous call (0 on the first)
    pub fn step(&mut self, now_ms: f64) -> u64 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        // Clocks can jump backwards (tab restore); treat as no time passed
        let elapsed = (now_ms - last).max(0.0) + self.carry_ms;
        let whole = elapsed.floor();
        self.carry_ms = elapsed - whole;
        whole as u64
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
        self.carry_ms = 0.0;
    }
}
