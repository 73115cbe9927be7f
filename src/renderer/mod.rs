//! Rendering module
//!
//! Emits SVG markup from the sector layout; hosts draw it however they like.

pub mod svg;

pub use svg::render_wheel;
