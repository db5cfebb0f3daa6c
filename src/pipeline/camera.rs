//! Camera position projection.
//!
//! The camera sits a fixed physical distance to the left of the robot's
//! travel direction. Travel is derived in local meters per sample (the
//! offset is metric), then the shifted position is converted back to
//! degrees with the sample's own latitude scale factors.

use crate::core::geo::{meter_factors, LatLon};
use crate::core::math::Vec2;

use super::GpsSample;

/// Compute per-sample camera positions offset `offset_m` meters to the
/// left of travel.
///
/// Samples must be sorted by `image_id`. The travel vector is a sequential
/// fold: a pair with consecutive ids and a displacement above 1e-6 m
/// updates the accumulator, anything else reuses the last valid vector
/// (seeded with (1, 0)).
pub fn project_camera_positions(samples: &[GpsSample], offset_m: f64) -> Vec<LatLon> {
    let mut cameras = Vec::with_capacity(samples.len());
    let mut last_travel = Vec2::UNIT_X;

    for (i, s) in samples.iter().enumerate() {
        let (lon_factor, lat_factor) = meter_factors(s.position.lat);

        let travel = match samples.get(i + 1) {
            Some(next) if next.image_id - s.image_id == 1 => {
                let step = s.position.degree_delta(&next.position);
                let step_m = Vec2::new(step.x * lon_factor, step.y * lat_factor);
                let dist = step_m.norm();
                if dist > 1e-6 {
                    last_travel = Vec2::new(step_m.x / dist, step_m.y / dist);
                }
                last_travel
            }
            _ => last_travel,
        };

        let left = travel.left();
        cameras.push(LatLon::new(
            s.position.lon + offset_m * left.x / lon_factor,
            s.position.lat + offset_m * left.y / lat_factor,
        ));
    }

    cameras
}
