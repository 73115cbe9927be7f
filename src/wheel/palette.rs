//! Sector fill colors
//!
//! Color choice is a lookup, not scattered branching: an option either
//! carries its own color, takes the palette entry for its position, or (with
//! no position to go by) gets a random palette entry.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed palette of vivid fills, indexed by option position
pub const PALETTE: [&str; 16] = [
    "#FF3366", "#FF9933", "#FFCC33", "#33CC66", //
    "#3399FF", "#9966FF", "#FF6699", "#66CCCC", //
    "#FF5733", "#C70039", "#44BD32", "#3498DB", //
    "#8E44AD", "#F1C40F", "#16A085", "#E74C3C",
];

/// Where a sector's fill came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorColor {
    /// Set on the option itself
    Explicit(String),
    /// Palette entry picked by option position
    Palette(usize),
    /// Palette entry picked at random (no position available)
    Random(usize),
}

impl SectorColor {
    /// Resolve a fill for an option
    ///
    /// `index` is the option's position on the wheel; only without it does
    /// the random fallback draw from `rng`.
    pub fn pick<R: Rng>(explicit: Option<&str>, index: Option<usize>, rng: &mut R) -> Self {
        match (explicit, index) {
            (Some(color), _) => SectorColor::Explicit(color.to_string()),
            (None, Some(i)) => SectorColor::Palette(i % PALETTE.len()),
            (None, None) => SectorColor::Random(rng.random_range(0..PALETTE.len())),
        }
    }

    /// Deterministic variant for layout, where the position is always known
    pub fn for_position(explicit: Option<&str>, index: usize) -> Self {
        match explicit {
            Some(color) => SectorColor::Explicit(color.to_string()),
            None => SectorColor::Palette(index % PALETTE.len()),
        }
    }

    /// CSS color string
    pub fn css(&self) -> &str {
        match self {
            SectorColor::Explicit(color) => color,
            SectorColor::Palette(i) | SectorColor::Random(i) => PALETTE[*i % PALETTE.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explicit_wins() {
        let mut rng = Pcg32::seed_from_u64(1);
        let c = SectorColor::pick(Some("#123456"), Some(3), &mut rng);
        assert_eq!(c, SectorColor::Explicit("#123456".into()));
        assert_eq!(c.css(), "#123456");
    }

    #[test]
    fn test_palette_wraps_by_index() {
        assert_eq!(SectorColor::for_position(None, 0).css(), "#FF3366");
        assert_eq!(SectorColor::for_position(None, 16), SectorColor::Palette(0));
        assert_eq!(SectorColor::for_position(None, 17).css(), "#FF9933");
    }

    #[test]
    fn test_random_fallback_stays_in_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            match SectorColor::pick(None, None, &mut rng) {
                SectorColor::Random(i) => assert!(i < PALETTE.len()),
                other => panic!("expected random pick, got {other:?}"),
            }
        }
    }
}
