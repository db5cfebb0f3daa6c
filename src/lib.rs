//! draksha-fov — offline vineyard image segregation from geo-reference data.
//!
//! Converts a robot-mounted camera's GPS log plus surveyed row endpoints
//! and grapevine positions into a per-image record of which vines fall
//! inside the camera's field of view. The geometric inference chain runs
//! as a single in-memory batch:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← CSV tables, SVG audit
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   pipeline/                         │  ← direction, camera offset,
//! │                                                     │    row assignment, FOV,
//! │                                                     │    coverage, matching
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     rows                            │  ← row registry + frames
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← geodetic frame, vectors
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Geometric degeneracies (zero-length rows, stationary samples, parallel
//! rays) resolve to documented fallbacks; only structurally missing data
//! (malformed row survey, empty GPS log) aborts a run.

// Layer 1: foundation (no internal deps)
pub mod core;

// Layer 2: domain model (depends on core)
pub mod rows;

// Layer 3: inference stages (depends on core, rows)
pub mod pipeline;

// Layer 4: infrastructure (depends on all layers)
pub mod io;

pub mod config;
pub mod error;

// Convenience re-exports
pub use crate::core::geo::{LatLon, METERS_PER_DEG_LAT};
pub use crate::core::math::Vec2;
pub use config::{CoverageSettings, PipelineConfig};
pub use error::{DrakshaError, Result};
pub use pipeline::coverage::{Vine, VineCoverage};
pub use pipeline::direction::Direction;
pub use pipeline::fov::{CameraPose, FovIntersections};
pub use pipeline::matching::MatchResult;
pub use pipeline::{GpsSample, ImageMatch, PipelineOutput};
pub use rows::{Endpoint, RowFrame, RowRegistry, RowSegment, SurveyPoint};
