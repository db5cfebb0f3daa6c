//! Per-vine coverage intervals along the row centerline.
//!
//! Each grapevine owns a 1-D span of ground along its row. Between
//! id-adjacent vines the span extends half the spacing (capped by
//! `max_half_extend`); at row ends and across id-numbering gaps fixed
//! extensions apply. Endpoints are stored geodetic.
//!
//! Precondition: vine ids are assumed spatially monotonic along the row.
//! The stage sorts by id, not by station, and only warns when the data
//! violates that assumption.

use crate::config::CoverageSettings;
use crate::core::geo::LatLon;
use crate::rows::RowRegistry;

/// One surveyed grapevine.
#[derive(Debug, Clone, Copy)]
pub struct Vine {
    pub row: i32,
    pub id: i32,
    pub position: LatLon,
}

/// A vine with its computed coverage interval.
///
/// Endpoints are None when the vine's row is absent from the registry;
/// such a vine can never be matched.
#[derive(Debug, Clone, Copy)]
pub struct VineCoverage {
    pub vine: Vine,
    pub start: Option<LatLon>,
    pub end: Option<LatLon>,
}

/// Compute coverage intervals for every vine.
///
/// Output order matches input order (the coverage table mirrors the vine
/// table row for row).
pub fn compute_vine_coverage(
    vines: &[Vine],
    registry: &RowRegistry,
    settings: &CoverageSettings,
) -> Vec<VineCoverage> {
    let mut out: Vec<VineCoverage> = vines
        .iter()
        .map(|&vine| VineCoverage {
            vine,
            start: None,
            end: None,
        })
        .collect();

    // Group indices by row, preserving first-appearance order.
    let mut row_order: Vec<i32> = Vec::new();
    for v in vines {
        if !row_order.contains(&v.row) {
            row_order.push(v.row);
        }
    }

    for row_id in row_order {
        let row = match registry.get(row_id) {
            Some(row) => row,
            None => {
                log::warn!("vines reference row {} absent from the survey; skipped", row_id);
                continue;
            }
        };
        let frame = row.frame();

        // (vine id, station, index into `out`), sorted by vine id.
        let mut stationed: Vec<(i32, f64, usize)> = vines
            .iter()
            .enumerate()
            .filter(|(_, v)| v.row == row_id)
            .map(|(idx, v)| (v.id, frame.station(v.position), idx))
            .collect();
        stationed.sort_by_key(|&(id, _, _)| id);

        if stationed
            .windows(2)
            .any(|w| w[1].1 < w[0].1)
        {
            log::warn!(
                "row {}: vine ids are not spatially monotonic along the row",
                row_id
            );
        }

        for k in 0..stationed.len() {
            let (id, s, idx) = stationed[k];

            let start = if k == 0 {
                s - settings.extend_first_last
            } else {
                let (prev_id, prev_s, _) = stationed[k - 1];
                if id - prev_id == 1 {
                    s - ((s - prev_s) / 2.0).min(settings.max_half_extend)
                } else {
                    s - settings.extend_not_continuous
                }
            };

            let end = if k == stationed.len() - 1 {
                s + settings.extend_first_last
            } else {
                let (next_id, next_s, _) = stationed[k + 1];
                if next_id - id == 1 {
                    s + ((next_s - s) / 2.0).min(settings.max_half_extend)
                } else {
                    s + settings.extend_not_continuous
                }
            };

            out[idx].start = Some(frame.point_at(start));
            out[idx].end = Some(frame.point_at(end));
        }
    }

    out
}
