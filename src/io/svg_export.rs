//! SVG audit rendering for visual inspection of a pipeline run.
//!
//! Renders the surveyed rows, the camera track colored by travel
//! direction, vine coverage intervals, and a sample of FOV wedges into a
//! single SVG file. This replaces interactive plotting for offline runs:
//! the SVG is an audit artifact, not a data product.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::geo::{to_local_meters, LatLon};
use crate::core::math::Vec2;
use crate::error::Result;
use crate::pipeline::coverage::VineCoverage;
use crate::pipeline::direction::Direction;
use crate::pipeline::ImageMatch;
use crate::rows::RowRegistry;

/// Colors used by the audit rendering.
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Row centerline color
    pub row: &'static str,
    /// Forward-labeled camera color
    pub forward: &'static str,
    /// Backward-labeled camera color
    pub backward: &'static str,
    /// Vine coverage interval color
    pub coverage: &'static str,
    /// FOV wedge color
    pub fov: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            row: "#333333",
            forward: "#22AA22",
            backward: "#AA2222",
            coverage: "#7744CC",
            fov: "#2222AA",
        }
    }
}

/// Configuration for the audit rendering.
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per meter
    pub scale: f64,
    /// Camera marker radius in pixels
    pub marker_radius: f64,
    /// Padding around the drawing in pixels
    pub padding: f64,
    /// How many evenly spaced poses get their FOV wedge drawn
    pub fov_samples: usize,
    /// Color scheme
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            marker_radius: 2.0,
            padding: 20.0,
            fov_samples: 0,
            colors: SvgColorScheme::default(),
        }
    }
}

/// Render a pipeline run to an SVG file.
pub fn render_audit_svg(
    path: &Path,
    registry: &RowRegistry,
    images: &[ImageMatch],
    coverage: &[VineCoverage],
    config: &SvgConfig,
) -> Result<()> {
    let reference = registry
        .iter()
        .next()
        .map(|r| r.start)
        .or_else(|| images.first().map(|m| m.camera))
        .unwrap_or(LatLon::new(0.0, 0.0));

    // Gather all drawable points to size the canvas.
    let mut points: Vec<Vec2> = Vec::new();
    for row in registry.iter() {
        points.push(to_local_meters(row.start, reference));
        points.push(to_local_meters(row.end, reference));
    }
    for m in images {
        points.push(to_local_meters(m.camera, reference));
    }
    for c in coverage {
        points.push(to_local_meters(c.vine.position, reference));
    }
    if points.is_empty() {
        points.push(Vec2::default());
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let width = (max_x - min_x) * config.scale + 2.0 * config.padding;
    let height = (max_y - min_y) * config.scale + 2.0 * config.padding;

    // Meters to pixels; SVG y grows downward.
    let px = |p: LatLon| -> (f64, f64) {
        let m = to_local_meters(p, reference);
        (
            (m.x - min_x) * config.scale + config.padding,
            height - ((m.y - min_y) * config.scale + config.padding),
        )
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        width, height, width, height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    // Rows
    for row in registry.iter() {
        let (x1, y1) = px(row.start);
        let (x2, y2) = px(row.end);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"#,
            x1, y1, x2, y2, config.colors.row
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="10" fill="{}">row {}</text>"#,
            x1 + 3.0,
            y1 - 3.0,
            config.colors.row,
            row.id
        );
    }

    // Vine coverage intervals
    for c in coverage {
        if let (Some(start), Some(end)) = (c.start, c.end) {
            let (x1, y1) = px(start);
            let (x2, y2) = px(end);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="4" stroke-linecap="round" opacity="0.6"/>"#,
                x1, y1, x2, y2, config.colors.coverage
            );
        }
    }

    // Sampled FOV wedges
    if config.fov_samples > 0 && !images.is_empty() {
        let step = (images.len() / config.fov_samples).max(1);
        for m in images.iter().step_by(step) {
            if let (Some(left), Some(right)) = (m.fov.left, m.fov.right) {
                let (cx, cy) = px(m.camera);
                let (lx, ly) = px(left);
                let (rx, ry) = px(right);
                let _ = writeln!(
                    svg,
                    r#"<polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{}" opacity="0.15" stroke="{}" stroke-width="0.5"/>"#,
                    cx, cy, lx, ly, rx, ry, config.colors.fov, config.colors.fov
                );
            }
        }
    }

    // Camera track colored by direction
    for m in images {
        let (x, y) = px(m.camera);
        let color = match m.direction {
            Direction::Forward => config.colors.forward,
            Direction::Backward => config.colors.backward,
        };
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            x, y, config.marker_radius, color
        );
    }

    let _ = writeln!(svg, "</svg>");
    std::fs::write(path, svg)?;
    Ok(())
}
