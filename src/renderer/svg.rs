//! SVG generation for the wheel face
//!
//! The face (rim, sectors, labels, hub) is drawn inside one group rotated
//! by the current wheel angle; the pointer is drawn outside it so it stays
//! fixed at 12 o'clock.

use std::fmt::Write;

use glam::Vec2;

use crate::wheel::{Sector, WheelGeometry};

const RIM_COLOR: &str = "#e0e0e0";
const SECTOR_STROKE: &str = "white";
const HUB_COLOR: &str = "#ffffff";
const POINTER_COLOR: &str = "#f59e0b";
const LABEL_COLOR: &str = "#ffffff";

/// Hub radius as a fraction of the wheel radius
const HUB_RATIO: f32 = 0.15;

/// Escape text for use in SVG content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Filled circle
pub fn circle(center: Vec2, radius: f32, fill: &str) -> String {
    format!(
        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
        center.x,
        center.y,
        radius,
        escape_xml(fill)
    )
}

/// Pie slice for one sector
pub fn sector_path(sector: &Sector) -> String {
    format!(
        r#"<path d="{}" fill="{}" stroke="{SECTOR_STROKE}" stroke-width="2"/>"#,
        sector.svg_path(),
        escape_xml(sector.color.css())
    )
}

/// Sector label, turned along its bisector
pub fn sector_label(sector: &Sector) -> String {
    let Vec2 { x, y } = sector.label_anchor;
    format!(
        concat!(
            r#"<text x="{x:.2}" y="{y:.2}" fill="{LABEL_COLOR}" text-anchor="middle" "#,
            r#"dominant-baseline="middle" transform="rotate({:.2}, {x:.2}, {y:.2})" "#,
            r#"font-size="{}px" font-weight="bold">{}</text>"#
        ),
        sector.label_rotation,
        sector.font_px,
        escape_xml(&sector.label),
        x = x,
        y = y,
        LABEL_COLOR = LABEL_COLOR,
    )
}

/// Downward-pointing marker at 12 o'clock, just above the rim
pub fn pointer(geometry: &WheelGeometry) -> String {
    let tip = Vec2::new(geometry.center.x, geometry.center.y - geometry.radius + 10.0);
    let half = 20.0;
    format!(
        r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{POINTER_COLOR}"/>"#,
        tip.x,
        tip.y,
        tip.x + half,
        tip.y - half,
        tip.x - half,
        tip.y - half,
    )
}

/// Full SVG document of the wheel turned by `rotation_degrees` (clockwise)
pub fn render_wheel(sectors: &[Sector], geometry: &WheelGeometry, rotation_degrees: f64) -> String {
    let size = geometry.center.x * 2.0;
    let mut svg = String::with_capacity(512 + sectors.len() * 384);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size:.0} {size:.0}">"#
    );
    let _ = write!(
        svg,
        r#"<g transform="rotate({:.3}, {:.2}, {:.2})">"#,
        rotation_degrees, geometry.center.x, geometry.center.y
    );
    svg.push_str(&circle(geometry.center, geometry.radius + 5.0, RIM_COLOR));
    for sector in sectors {
        svg.push_str(&sector_path(sector));
    }
    for sector in sectors {
        svg.push_str(&sector_label(sector));
    }
    svg.push_str(&circle(geometry.center, geometry.radius * HUB_RATIO, HUB_COLOR));
    svg.push_str("</g>");
    svg.push_str(&pointer(geometry));
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{WheelOption, build_sectors};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"Fish & "Chips" <3"#), "Fish &amp; &quot;Chips&quot; &lt;3");
    }

    #[test]
    fn test_render_wheel_structure() {
        let geo = WheelGeometry::default();
        let options: Vec<WheelOption> = ["Tom & Jerry", "B", "C"]
            .into_iter()
            .map(WheelOption::from)
            .collect();
        let sectors = build_sectors(&options, &geo);
        let svg = render_wheel(&sectors, &geo, 1170.0);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 500 500""#));
        assert!(svg.contains("rotate(1170.000, 250.00, 250.00)"));
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("#FF3366"));
    }

    #[test]
    fn test_empty_wheel_still_renders() {
        let geo = WheelGeometry::default();
        let svg = render_wheel(&[], &geo, 0.0);
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<polygon"));
    }
}
