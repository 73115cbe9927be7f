//! Sector layout for the wheel face
//!
//! Angles are in degrees, measured clockwise from 12 o'clock:
//! - sector `i` of `n` spans [360·i/n, 360·(i+1)/n)
//! - points are in screen space (y down) inside a square view box
//! - labels sit on the sector bisector and are turned so they never read upside down

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::option::WheelOption;
use super::palette::SectorColor;
use crate::consts::*;
use crate::polar_to_screen;

/// Circle the sectors are laid out on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    pub center: Vec2,
    pub radius: f32,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            center: Vec2::splat(VIEW_BOX_SIZE / 2.0),
            radius: WHEEL_RADIUS,
        }
    }
}

/// Render geometry for one option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Position of the option in the input list
    pub index: usize,
    pub start_degrees: f32,
    pub end_degrees: f32,
    /// Rim point at the start angle
    pub start_point: Vec2,
    /// Rim point at the end angle
    pub end_point: Vec2,
    /// SVG large-arc flag (only a lone sector exceeds 180°)
    pub large_arc: bool,
    /// Label center, 65% of the way out along the bisector
    pub label_anchor: Vec2,
    /// Label rotation in degrees (bisector, turned 180° when flipped)
    pub label_rotation: f32,
    /// Whether the label was turned to stay readable
    pub flipped: bool,
    /// Display text, truncated for the wheel face
    pub label: String,
    pub font_px: f32,
    pub color: SectorColor,
    radius: f32,
    center: Vec2,
}

impl Sector {
    /// Angular span of the sector
    #[inline]
    pub fn span(&self) -> f32 {
        self.end_degrees - self.start_degrees
    }

    /// Bisecting angle (label direction before any flip)
    #[inline]
    pub fn mid_degrees(&self) -> f32 {
        self.start_degrees + self.span() / 2.0
    }

    /// Pie-slice outline as SVG path data
    pub fn svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
            self.center.x,
            self.center.y,
            self.start_point.x,
            self.start_point.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            self.end_point.x,
            self.end_point.y,
        )
    }
}

/// Label length limit for a wheel with `option_count` options
#[inline]
pub fn label_limit(option_count: usize) -> usize {
    if option_count > CROWDED_OPTION_COUNT {
        LABEL_MAX_CHARS_CROWDED
    } else {
        LABEL_MAX_CHARS
    }
}

/// Shorten a label to `max_chars`, ending in "..." when cut
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Lay out one sector per option, in input order
pub fn build_sectors(options: &[WheelOption], geometry: &WheelGeometry) -> Vec<Sector> {
    let n = options.len();
    if n == 0 {
        return Vec::new();
    }

    let span = 360.0 / n as f32;
    let max_chars = label_limit(n);
    let font_px = if n > CROWDED_OPTION_COUNT {
        LABEL_FONT_PX_CROWDED
    } else {
        LABEL_FONT_PX
    };

    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            // Multiply before dividing so the last sector ends on exactly 360
            let start = 360.0 * i as f32 / n as f32;
            let end = 360.0 * (i + 1) as f32 / n as f32;
            let mid = start + (end - start) / 2.0;

            let flipped = mid > 90.0 && mid < 270.0;
            let label_rotation = if flipped { mid + 180.0 } else { mid };

            Sector {
                index: i,
                start_degrees: start,
                end_degrees: end,
                start_point: polar_to_screen(geometry.center, geometry.radius, start),
                end_point: polar_to_screen(geometry.center, geometry.radius, end),
                large_arc: span > 180.0,
                label_anchor: polar_to_screen(
                    geometry.center,
                    geometry.radius * LABEL_RADIUS_RATIO,
                    mid,
                ),
                label_rotation,
                flipped,
                label: truncate_label(&option.text, max_chars),
                font_px,
                color: SectorColor::for_position(option.explicit_color(), i),
                radius: geometry.radius,
                center: geometry.center,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn options(n: usize) -> Vec<WheelOption> {
        (0..n).map(|i| WheelOption::new(format!("Option {i}"))).collect()
    }

    #[test]
    fn test_empty_input_has_no_sectors() {
        assert!(build_sectors(&[], &WheelGeometry::default()).is_empty());
    }

    #[test]
    fn test_four_sector_layout() {
        let geo = WheelGeometry::default();
        let sectors = build_sectors(&options(4), &geo);
        assert_eq!(sectors.len(), 4);

        // Sector 0 starts at 12 o'clock and ends at 3 o'clock
        let s0 = &sectors[0];
        assert_eq!(s0.start_degrees, 0.0);
        assert_eq!(s0.end_degrees, 90.0);
        assert!((s0.start_point - Vec2::new(250.0, 10.0)).length() < 1e-3);
        assert!((s0.end_point - Vec2::new(490.0, 250.0)).length() < 1e-3);
        assert!(!s0.large_arc);
        assert!(!s0.flipped);
        assert_eq!(s0.label_rotation, 45.0);

        // Lower half labels are turned to stay readable
        assert!(sectors[1].flipped);
        assert_eq!(sectors[1].label_rotation, 315.0);
        assert!(sectors[2].flipped);
        assert_eq!(sectors[2].label_rotation, 405.0);
        assert!(!sectors[3].flipped);
        assert_eq!(sectors[3].label_rotation, 315.0);
    }

    #[test]
    fn test_label_anchor_at_65_percent() {
        let geo = WheelGeometry::default();
        for sector in build_sectors(&options(6), &geo) {
            let dist = (sector.label_anchor - geo.center).length();
            assert!((dist - geo.radius * 0.65).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bisector_on_boundary_is_not_flipped() {
        // Two options: bisectors at exactly 90° and 270°
        let sectors = build_sectors(&options(2), &WheelGeometry::default());
        assert_eq!(sectors[0].mid_degrees(), 90.0);
        assert!(!sectors[0].flipped);
        assert_eq!(sectors[1].mid_degrees(), 270.0);
        assert!(!sectors[1].flipped);
    }

    #[test]
    fn test_single_option_uses_large_arc() {
        let sectors = build_sectors(&options(1), &WheelGeometry::default());
        assert_eq!(sectors.len(), 1);
        assert!(sectors[0].large_arc);
        assert_eq!(sectors[0].span(), 360.0);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Pizza", 12), "Pizza");
        assert_eq!(truncate_label("Exactly12chr", 12), "Exactly12chr");
        assert_eq!(truncate_label("Thirteen char", 12), "Thirteen ...");
        assert_eq!(truncate_label("Spaghetti", 8), "Spagh...");
        // Counted in chars, not bytes
        assert_eq!(truncate_label("caffè latte macchiato", 8), "caffè...");
    }

    #[test]
    fn test_crowded_wheel_uses_short_labels_and_small_font() {
        let mut opts = options(9);
        opts[0].text = "Long label here".into();
        let sectors = build_sectors(&opts, &WheelGeometry::default());
        assert_eq!(sectors[0].label, "Long ...");
        assert_eq!(sectors[0].font_px, LABEL_FONT_PX_CROWDED);

        let mut opts = options(8);
        opts[0].text = "Long label here".into();
        let sectors = build_sectors(&opts, &WheelGeometry::default());
        assert_eq!(sectors[0].label, "Long labe...");
        assert_eq!(sectors[0].font_px, LABEL_FONT_PX);
    }

    #[test]
    fn test_colors_follow_position_unless_explicit() {
        let mut opts = options(3);
        opts[1].color = Some("#000000".into());
        opts[2].color = Some(String::new());
        let sectors = build_sectors(&opts, &WheelGeometry::default());
        assert_eq!(sectors[0].color, SectorColor::Palette(0));
        assert_eq!(sectors[1].color, SectorColor::Explicit("#000000".into()));
        assert_eq!(sectors[2].color, SectorColor::Palette(2));
    }

    #[test]
    fn test_svg_path() {
        let sectors = build_sectors(&options(4), &WheelGeometry::default());
        assert_eq!(
            sectors[0].svg_path(),
            "M 250.00 250.00 L 250.00 10.00 A 240.00 240.00 0 0 1 490.00 250.00 Z"
        );
    }

    proptest! {
        #[test]
        fn prop_sectors_tile_the_circle(n in 1usize..64) {
            let sectors = build_sectors(&options(n), &WheelGeometry::default());
            prop_assert_eq!(sectors.len(), n);
            prop_assert_eq!(sectors[0].start_degrees, 0.0);
            prop_assert_eq!(sectors[n - 1].end_degrees, 360.0);

            let expected = 360.0 / n as f32;
            for pair in sectors.windows(2) {
                prop_assert_eq!(pair[0].end_degrees, pair[1].start_degrees);
            }
            for sector in &sectors {
                prop_assert!((sector.span() - expected).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_labels_never_upside_down(n in 1usize..64) {
            for sector in build_sectors(&options(n), &WheelGeometry::default()) {
                let facing = sector.label_rotation.rem_euclid(360.0);
                prop_assert!(!(facing > 90.0 && facing < 270.0));
            }
        }
    }
}
