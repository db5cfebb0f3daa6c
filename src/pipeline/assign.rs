//! Nearest-row assignment.
//!
//! Every camera position is assigned the row line with the smallest
//! perpendicular distance in degree space. There is no "no row" outcome:
//! the nearest row is chosen however far away it is, and distance ties go
//! to the first-surveyed row.

use crate::core::geo::LatLon;
use crate::core::math::{point_to_line_distance, Vec2};
use crate::rows::RowRegistry;

/// Assign each camera position to its nearest row id.
///
/// O(cameras × rows); fine at hundreds of rows and thousands of samples.
/// Returns -1 for a camera when the registry is empty.
pub fn assign_rows(cameras: &[LatLon], registry: &RowRegistry) -> Vec<i32> {
    cameras
        .iter()
        .map(|cam| {
            let p = Vec2::new(cam.lon, cam.lat);
            let mut best_row = -1;
            let mut best_dist = f64::INFINITY;
            for row in registry.iter() {
                let p0 = Vec2::new(row.start.lon, row.start.lat);
                let dist = point_to_line_distance(p, p0, row.direction);
                if dist < best_dist {
                    best_dist = dist;
                    best_row = row.id;
                }
            }
            best_row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{Endpoint, SurveyPoint};

    fn two_parallel_rows() -> RowRegistry {
        // Row 1 at lon 0, row 2 at lon 0.001, both pointing north.
        RowRegistry::from_survey(&[
            SurveyPoint {
                row: 1,
                endpoint: Endpoint::Start,
                position: LatLon::new(0.0, 0.0),
            },
            SurveyPoint {
                row: 1,
                endpoint: Endpoint::End,
                position: LatLon::new(0.0, 0.001),
            },
            SurveyPoint {
                row: 2,
                endpoint: Endpoint::Start,
                position: LatLon::new(0.001, 0.0),
            },
            SurveyPoint {
                row: 2,
                endpoint: Endpoint::End,
                position: LatLon::new(0.001, 0.001),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_assigns_nearest_row() {
        let registry = two_parallel_rows();
        let cams = vec![LatLon::new(0.0002, 0.0005), LatLon::new(0.0009, 0.0005)];
        assert_eq!(assign_rows(&cams, &registry), vec![1, 2]);
    }

    #[test]
    fn test_far_point_still_assigned() {
        let registry = two_parallel_rows();
        let cams = vec![LatLon::new(10.0, -5.0)];
        assert_eq!(assign_rows(&cams, &registry), vec![2]);
    }

    #[test]
    fn test_tie_goes_to_first_surveyed_row() {
        let registry = two_parallel_rows();
        let cams = vec![LatLon::new(0.0005, 0.0005)];
        assert_eq!(assign_rows(&cams, &registry), vec![1]);
    }

    #[test]
    fn test_empty_registry_yields_sentinel() {
        let registry = RowRegistry::default();
        let cams = vec![LatLon::new(0.0, 0.0)];
        assert_eq!(assign_rows(&cams, &registry), vec![-1]);
    }
}
