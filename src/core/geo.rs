//! Geodetic coordinates and the local planar meter frame.
//!
//! All distance-correct arithmetic runs in an equirectangular approximation
//! anchored at a nearby reference point: one degree of latitude is treated
//! as 111 320 m and one degree of longitude as 111 320·cos(refLat) m. The
//! approximation is only valid close to the reference, so each row anchors
//! its own frame at its start point.

use serde::{Deserialize, Serialize};

use super::math::Vec2;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// A geodetic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LatLon {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Raw degree-space displacement from `self` to `other` as (dlon, dlat).
    ///
    /// Not distance-correct; use [`to_local_meters`] where metric lengths
    /// matter.
    #[inline]
    pub fn degree_delta(&self, other: &LatLon) -> Vec2 {
        Vec2::new(other.lon - self.lon, other.lat - self.lat)
    }
}

/// Convert a geodetic position to local meters relative to `reference`.
///
/// Returns (x, y) where x points east and y points north.
#[inline]
pub fn to_local_meters(p: LatLon, reference: LatLon) -> Vec2 {
    let lat_rad = reference.lat.to_radians();
    Vec2::new(
        (p.lon - reference.lon) * METERS_PER_DEG_LAT * lat_rad.cos(),
        (p.lat - reference.lat) * METERS_PER_DEG_LAT,
    )
}

/// Inverse of [`to_local_meters`]: local meters back to geodetic degrees.
#[inline]
pub fn to_lat_lon(v: Vec2, reference: LatLon) -> LatLon {
    let lat_rad = reference.lat.to_radians();
    LatLon::new(
        v.x / (METERS_PER_DEG_LAT * lat_rad.cos()) + reference.lon,
        v.y / METERS_PER_DEG_LAT + reference.lat,
    )
}

/// Per-point longitude/latitude meter scale factors.
///
/// The camera offset stage scales by the sample's own latitude rather than
/// a row reference, so the factors are exposed separately.
#[inline]
pub fn meter_factors(lat: f64) -> (f64, f64) {
    (METERS_PER_DEG_LAT * lat.to_radians().cos(), METERS_PER_DEG_LAT)
}
