//! Surveyed vineyard rows: segments, per-row meter frames, and the registry.
//!
//! A row is a straight line between two surveyed endpoints, S (start) and
//! E (end). Every downstream stage reads rows through [`RowRegistry`];
//! nothing mutates a row after the registry is built.
//!
//! Two conventions matter for the rest of the pipeline:
//!
//! - Row *directions* live in raw degree space (nearest-row assignment and
//!   FOV ray intersection both work there).
//! - Row *stations* (1-D scalar positions along the centerline) live in the
//!   row's own local meter frame anchored at S. Coverage intervals and FOV
//!   footprints must be projected through the same [`RowFrame`] to be
//!   comparable.

use crate::core::geo::{to_lat_lon, to_local_meters, LatLon};
use crate::core::math::Vec2;
use crate::error::{DrakshaError, Result};

/// Threshold below which a segment is treated as zero-length.
const DEGENERATE_EPS: f64 = 1e-9;

/// Which endpoint of a row a survey record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// One record of the row survey table, already parsed.
#[derive(Debug, Clone, Copy)]
pub struct SurveyPoint {
    pub row: i32,
    pub endpoint: Endpoint,
    pub position: LatLon,
}

/// A surveyed row line segment.
#[derive(Debug, Clone, Copy)]
pub struct RowSegment {
    pub id: i32,
    pub start: LatLon,
    pub end: LatLon,
    /// Unit S→E direction in degree space; (1, 0) when the segment is
    /// degenerate.
    pub direction: Vec2,
}

impl RowSegment {
    fn new(id: i32, start: LatLon, end: LatLon) -> Self {
        let direction = start.degree_delta(&end).normalized_or_unit_x(DEGENERATE_EPS);
        Self {
            id,
            start,
            end,
            direction,
        }
    }

    /// Raw (unnormalized) S→E degree-space delta.
    #[inline]
    pub fn degree_delta(&self) -> Vec2 {
        self.start.degree_delta(&self.end)
    }

    /// Orthogonally project a point onto the infinite S–E line in degree
    /// space. Used to snap surveyed vine positions onto their row.
    ///
    /// A degenerate segment projects everything onto S.
    pub fn project_onto_line(&self, p: LatLon) -> LatLon {
        let line = self.degree_delta();
        let len_sq = line.dot(&line);
        if len_sq < DEGENERATE_EPS * DEGENERATE_EPS {
            return self.start;
        }
        let v = self.start.degree_delta(&p);
        let t = v.dot(&line) / len_sq;
        let proj = Vec2::new(self.start.lon, self.start.lat) + line * t;
        LatLon::new(proj.x, proj.y)
    }

    /// The local meter frame anchored at this row's start point.
    pub fn frame(&self) -> RowFrame {
        let end_m = to_local_meters(self.end, self.start);
        RowFrame {
            reference: self.start,
            axis: end_m.normalized_or_unit_x(DEGENERATE_EPS),
        }
    }
}

/// Per-row 1-D coordinate frame: meters along the centerline from S.
///
/// Coverage computation and FOV matching each project points through this
/// frame; sharing one object per row keeps their station coordinates on the
/// same origin and axis.
#[derive(Debug, Clone, Copy)]
pub struct RowFrame {
    reference: LatLon,
    axis: Vec2,
}

impl RowFrame {
    /// Scalar station of a geodetic point along the row centerline.
    #[inline]
    pub fn station(&self, p: LatLon) -> f64 {
        to_local_meters(p, self.reference).dot(&self.axis)
    }

    /// Geodetic point at a given station on the centerline.
    #[inline]
    pub fn point_at(&self, station: f64) -> LatLon {
        to_lat_lon(self.axis * station, self.reference)
    }
}

/// Immutable index of all surveyed rows.
///
/// Rows iterate in first-appearance order of the survey table so that
/// nearest-row distance ties resolve to the first surveyed row, matching
/// the assignment tie-break policy.
#[derive(Debug, Clone, Default)]
pub struct RowRegistry {
    rows: Vec<RowSegment>,
}

impl RowRegistry {
    /// Build the registry from parsed survey points.
    ///
    /// Fails when a row id is missing an endpoint or carries duplicates;
    /// partially surveyed rows would otherwise poison every downstream
    /// stage silently.
    pub fn from_survey(points: &[SurveyPoint]) -> Result<Self> {
        // (row id, S, E) in first-appearance order.
        let mut pending: Vec<(i32, Option<LatLon>, Option<LatLon>)> = Vec::new();

        for p in points {
            let idx = match pending.iter().position(|(id, _, _)| *id == p.row) {
                Some(idx) => idx,
                None => {
                    pending.push((p.row, None, None));
                    pending.len() - 1
                }
            };
            let slot = &mut pending[idx];
            let (cell, label) = match p.endpoint {
                Endpoint::Start => (&mut slot.1, 'S'),
                Endpoint::End => (&mut slot.2, 'E'),
            };
            if cell.is_some() {
                return Err(DrakshaError::DuplicateRowEndpoint {
                    row: p.row,
                    endpoint: label,
                });
            }
            *cell = Some(p.position);
        }

        let mut rows = Vec::with_capacity(pending.len());
        for (id, start, end) in pending {
            let start = start.ok_or(DrakshaError::MalformedRowData { row: id, missing: 'S' })?;
            let end = end.ok_or(DrakshaError::MalformedRowData { row: id, missing: 'E' })?;
            rows.push(RowSegment::new(id, start, end));
        }

        Ok(Self { rows })
    }

    /// Look up a row by id.
    pub fn get(&self, id: i32) -> Option<&RowSegment> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Rows in survey-file order.
    pub fn iter(&self) -> impl Iterator<Item = &RowSegment> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dominant vineyard direction: the normalized simple average of the
    /// raw degree-space S→E deltas of all rows. Defaults to (1, 0) when
    /// there are no rows or the average cancels out.
    pub fn dominant_direction(&self) -> Vec2 {
        if self.rows.is_empty() {
            return Vec2::UNIT_X;
        }
        let mut sum = Vec2::default();
        for row in &self.rows {
            sum = sum + row.degree_delta();
        }
        let n = self.rows.len() as f64;
        Vec2::new(sum.x / n, sum.y / n).normalized_or_unit_x(1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn survey(row: i32, endpoint: Endpoint, lon: f64, lat: f64) -> SurveyPoint {
        SurveyPoint {
            row,
            endpoint,
            position: LatLon::new(lon, lat),
        }
    }

    #[test]
    fn test_registry_builds_unit_directions() {
        let registry = RowRegistry::from_survey(&[
            survey(1, Endpoint::Start, 0.0, 0.0),
            survey(1, Endpoint::End, 0.0, 0.001),
            survey(2, Endpoint::Start, 0.0001, 0.0),
            survey(2, Endpoint::End, 0.0001, 0.001),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        for row in registry.iter() {
            assert_relative_eq!(row.direction.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_degenerate_row_defaults_to_unit_x() {
        let registry = RowRegistry::from_survey(&[
            survey(7, Endpoint::Start, 5.0, 5.0),
            survey(7, Endpoint::End, 5.0, 5.0),
        ])
        .unwrap();
        assert_eq!(registry.get(7).unwrap().direction, Vec2::UNIT_X);
    }

    #[test]
    fn test_missing_endpoint_is_fatal() {
        let err = RowRegistry::from_survey(&[survey(3, Endpoint::Start, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            DrakshaError::MalformedRowData { row: 3, missing: 'E' }
        ));
    }

    #[test]
    fn test_duplicate_endpoint_is_fatal() {
        let err = RowRegistry::from_survey(&[
            survey(3, Endpoint::Start, 0.0, 0.0),
            survey(3, Endpoint::Start, 1.0, 0.0),
            survey(3, Endpoint::End, 0.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DrakshaError::DuplicateRowEndpoint { row: 3, endpoint: 'S' }
        ));
    }

    #[test]
    fn test_iteration_keeps_survey_order() {
        let registry = RowRegistry::from_survey(&[
            survey(9, Endpoint::Start, 0.0, 0.0),
            survey(9, Endpoint::End, 1.0, 0.0),
            survey(2, Endpoint::Start, 0.0, 1.0),
            survey(2, Endpoint::End, 1.0, 1.0),
        ])
        .unwrap();
        let ids: Vec<i32> = registry.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 2]);
    }

    #[test]
    fn test_dominant_direction_averages_raw_deltas() {
        // A long row should dominate a short opposing one.
        let registry = RowRegistry::from_survey(&[
            survey(1, Endpoint::Start, 0.0, 0.0),
            survey(1, Endpoint::End, 0.0, 0.01),
            survey(2, Endpoint::Start, 0.0, 0.0),
            survey(2, Endpoint::End, 0.0, -0.001),
        ])
        .unwrap();
        let d = registry.dominant_direction();
        assert_relative_eq!(d.x, 0.0);
        assert_relative_eq!(d.y, 1.0);
    }

    #[test]
    fn test_frame_station_round_trip() {
        let registry = RowRegistry::from_survey(&[
            survey(1, Endpoint::Start, 0.0, 0.0),
            survey(1, Endpoint::End, 0.0, 0.001),
        ])
        .unwrap();
        let frame = registry.get(1).unwrap().frame();
        let p = frame.point_at(25.0);
        assert_relative_eq!(frame.station(p), 25.0, epsilon = 1e-6);
    }

    #[test]
    fn test_project_onto_line() {
        let registry = RowRegistry::from_survey(&[
            survey(1, Endpoint::Start, 0.0, 0.0),
            survey(1, Endpoint::End, 0.002, 0.0),
        ])
        .unwrap();
        let snapped = registry
            .get(1)
            .unwrap()
            .project_onto_line(LatLon::new(0.001, 0.0005));
        assert_relative_eq!(snapped.lon, 0.001, epsilon = 1e-12);
        assert_relative_eq!(snapped.lat, 0.0, epsilon = 1e-12);
    }
}
