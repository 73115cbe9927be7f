//! Decision Wheel - spin engine for decision wheels
//!
//! Core modules:
//! - `wheel`: Pure engine core (sector layout, spin state machine, result resolution)
//! - `engine`: Host-facing driver that owns the options and dispatches side effects
//! - `effects`: Side-effect hooks (audio cues, celebration overlay, spinning flag)
//! - `renderer`: SVG export of the wheel geometry
//! - `settings`: Spin timing and behaviour configuration
//! - `history`: Recent spin log kept by the caller
//! - `platform`: Frame clock and browser bindings

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod effects;
pub mod engine;
pub mod history;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod wheel;

pub use effects::{EffectError, LogHooks, NoopHooks, SpinHooks};
pub use engine::SpinEngine;
pub use history::SpinHistory;
pub use settings::{ResolveAgainst, WheelSettings};
pub use wheel::{Sector, SpinPhase, WheelOption, build_sectors, resolve};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Spin animation length; the result is resolved when it elapses
    pub const SPIN_DURATION_MS: u64 = 5000;
    /// Celebration overlay length, started at resolution
    pub const CELEBRATION_DURATION_MS: u64 = 3000;

    /// Every spin adds at least three full turns
    pub const MIN_EXTRA_DEGREES: u32 = 1080;
    /// Random part of a spin: [0, 720) extra degrees (up to five turns total)
    pub const EXTRA_DEGREES_SPAN: u32 = 720;

    /// Fewest options that enable the spin trigger
    pub const MIN_OPTIONS_TO_SPIN: usize = 2;

    /// Square SVG view box the wheel is laid out in
    pub const VIEW_BOX_SIZE: f32 = 500.0;
    /// Rim radius, leaving room for the border ring
    pub const WHEEL_RADIUS: f32 = VIEW_BOX_SIZE / 2.0 - 10.0;
    /// Labels sit at 65% of the radius along the sector bisector
    pub const LABEL_RADIUS_RATIO: f32 = 0.65;

    /// Label length limit for roomy wheels
    pub const LABEL_MAX_CHARS: usize = 12;
    /// Label length limit once the wheel is crowded
    pub const LABEL_MAX_CHARS_CROWDED: usize = 8;
    /// A wheel with more options than this is crowded
    pub const CROWDED_OPTION_COUNT: usize = 8;
    /// Label font sizes (px)
    pub const LABEL_FONT_PX: f32 = 14.0;
    pub const LABEL_FONT_PX_CROWDED: f32 = 12.0;

    /// Recent spins kept by `SpinHistory`
    pub const HISTORY_LEN: usize = 10;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Float rounding can still yield exactly 360.0 for tiny negative inputs;
/// callers that index by angle must clamp.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Point at `radius` from `center`, `degrees` clockwise from 12 o'clock
///
/// Screen coordinates: y grows downward, so the -90° offset puts 0° at the top.
#[inline]
pub fn polar_to_screen(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    let theta = (degrees - 90.0).to_radians();
    center + Vec2::new(radius * theta.cos(), radius * theta.sin())
}
