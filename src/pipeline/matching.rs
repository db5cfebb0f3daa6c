//! Vine–FOV interval matching.
//!
//! The FOV footprint (span between the left and right boundary
//! intersections) and every vine coverage interval on the same row are
//! projected onto the row's shared meter frame and compared as closed
//! 1-D intervals; touching counts as overlap.

use crate::rows::RowRegistry;

use super::coverage::VineCoverage;
use super::fov::{CameraPose, FovIntersections};

/// Vines visible from one image.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub image_id: i64,
    /// `"{row}-{vineId}"` keys in vine table order; empty when the pose has
    /// no usable FOV footprint or nothing overlaps.
    pub covered: Vec<String>,
}

/// Match every camera pose against the vine coverage intervals of its
/// assigned row.
pub fn match_vines_in_fov(
    poses: &[CameraPose],
    fov: &[FovIntersections],
    coverage: &[VineCoverage],
    registry: &RowRegistry,
) -> Vec<MatchResult> {
    debug_assert_eq!(poses.len(), fov.len());

    // Vine intervals per row, min/max-normalized stations on the row's own
    // frame. Vine order within a row follows the vine table.
    let mut intervals: Vec<(i32, Vec<(i32, f64, f64)>)> = Vec::new();
    for row in registry.iter() {
        let frame = row.frame();
        let spans: Vec<(i32, f64, f64)> = coverage
            .iter()
            .filter(|c| c.vine.row == row.id)
            .filter_map(|c| {
                let (start, end) = (c.start?, c.end?);
                let a = frame.station(start);
                let b = frame.station(end);
                Some((c.vine.id, a.min(b), a.max(b)))
            })
            .collect();
        intervals.push((row.id, spans));
    }

    poses
        .iter()
        .zip(fov)
        .map(|(pose, fov)| {
            let mut covered = Vec::new();
            if let (Some(row), Some(left), Some(right)) =
                (registry.get(pose.row), fov.left, fov.right)
            {
                let frame = row.frame();
                let s_left = frame.station(left);
                let s_right = frame.station(right);
                let fov_min = s_left.min(s_right);
                let fov_max = s_left.max(s_right);

                if let Some((_, spans)) = intervals.iter().find(|(id, _)| *id == row.id) {
                    for &(vine_id, vine_min, vine_max) in spans {
                        if vine_max < fov_min || vine_min > fov_max {
                            continue;
                        }
                        covered.push(format!("{}-{}", row.id, vine_id));
                    }
                }
            }
            MatchResult {
                image_id: pose.image_id,
                covered,
            }
        })
        .collect()
}
