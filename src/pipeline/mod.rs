//! Batch pipeline: raw GPS log + row survey + vine table in, per-image
//! visible-vine records out.
//!
//! Stages are pure functions over immutable inputs and run strictly in
//! sequence; each produces new derived records and mutates nothing it was
//! given. A fatal error (malformed survey, empty GPS log) aborts the run
//! before any output is produced.

pub mod assign;
pub mod camera;
pub mod coverage;
pub mod direction;
pub mod fov;
pub mod matching;

use crate::config::PipelineConfig;
use crate::core::geo::LatLon;
use crate::error::{DrakshaError, Result};
use crate::rows::RowRegistry;

use coverage::{Vine, VineCoverage};
use direction::Direction;
use fov::{CameraPose, FovIntersections};

/// One sample of the image GPS log.
#[derive(Debug, Clone, Copy)]
pub struct GpsSample {
    pub image_id: i64,
    pub position: LatLon,
}

/// Final per-image record: everything the matched output table needs.
#[derive(Debug, Clone)]
pub struct ImageMatch {
    pub image_id: i64,
    pub direction: Direction,
    pub camera: LatLon,
    pub assigned_row: i32,
    pub fov: FovIntersections,
    pub covered: Vec<String>,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub coverage: Vec<VineCoverage>,
    pub images: Vec<ImageMatch>,
}

/// Run the full inference chain.
///
/// Samples are sorted by image id before any directional computation;
/// vines are optionally snapped onto their row line first.
pub fn run(
    mut samples: Vec<GpsSample>,
    mut vines: Vec<Vine>,
    registry: &RowRegistry,
    config: &PipelineConfig,
) -> Result<PipelineOutput> {
    if samples.is_empty() {
        return Err(DrakshaError::EmptyGpsLog);
    }
    samples.sort_by_key(|s| s.image_id);

    if config.snap_vines {
        log::info!("snapping {} vine positions onto their row lines", vines.len());
        for v in &mut vines {
            if let Some(row) = registry.get(v.row) {
                v.position = row.project_onto_line(v.position);
            }
        }
    }

    log::info!(
        "computing coverage intervals for {} vines across {} rows",
        vines.len(),
        registry.len()
    );
    let coverage = coverage::compute_vine_coverage(&vines, registry, &config.coverage);

    log::info!("classifying travel direction for {} samples", samples.len());
    let directions = direction::classify_directions(&samples, registry);

    log::info!(
        "projecting camera positions ({} m left of travel)",
        config.camera_offset_m
    );
    let cameras = camera::project_camera_positions(&samples, config.camera_offset_m);

    log::info!("assigning nearest rows");
    let assigned = assign::assign_rows(&cameras, registry);

    let poses: Vec<CameraPose> = samples
        .iter()
        .zip(cameras.iter())
        .zip(assigned.iter())
        .map(|((s, &position), &row)| CameraPose {
            image_id: s.image_id,
            position,
            row,
        })
        .collect();

    log::info!("intersecting {}° FOV rays with assigned rows", config.fov_degrees);
    let intersections = fov::compute_fov_intersections(&poses, registry, config.fov_degrees);

    log::info!("matching vine coverage against FOV footprints");
    let matches = matching::match_vines_in_fov(&poses, &intersections, &coverage, registry);

    let images = poses
        .iter()
        .zip(directions)
        .zip(intersections)
        .zip(matches)
        .map(|(((pose, direction), fov), m)| ImageMatch {
            image_id: pose.image_id,
            direction,
            camera: pose.position,
            assigned_row: pose.row,
            fov,
            covered: m.covered,
        })
        .collect();

    Ok(PipelineOutput { coverage, images })
}
