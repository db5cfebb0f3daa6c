//! Foundation types and math primitives (no internal deps).

pub mod geo;
pub mod math;

pub use geo::{to_lat_lon, to_local_meters, LatLon, METERS_PER_DEG_LAT};
pub use math::{ray_line_intersection, rotate_deg, Vec2};
