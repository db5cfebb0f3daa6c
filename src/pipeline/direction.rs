//! Movement-direction classification.
//!
//! Each GPS sample is labeled Forward or Backward relative to the
//! vineyard's dominant row direction. The label stored at sample `i`
//! describes the motion edge from `i` to `i+1` but is read downstream as
//! "direction at i"; that alignment is load-bearing for every consumer and
//! must not be shifted.

use std::fmt;

use crate::core::math::Vec2;
use crate::rows::RowRegistry;

use super::GpsSample;

/// Travel sense relative to the dominant S→E row direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Single-letter table encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "F",
            Direction::Backward => "B",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify each sample's travel sense.
///
/// Samples must already be sorted by `image_id`. A pair only counts as a
/// motion step when the ids are consecutive; otherwise (and for the last
/// sample) the previous label is reused, with Forward as the seed.
pub fn classify_directions(samples: &[GpsSample], registry: &RowRegistry) -> Vec<Direction> {
    let dominant = registry.dominant_direction();
    log::debug!(
        "dominant row direction: ({:.6}, {:.6})",
        dominant.x,
        dominant.y
    );

    let mut labels: Vec<Direction> = Vec::with_capacity(samples.len());
    for i in 0..samples.len() {
        let carried = labels.last().copied().unwrap_or(Direction::Forward);
        let label = match samples.get(i + 1) {
            Some(next) if next.image_id - samples[i].image_id == 1 => {
                let step = samples[i].position.degree_delta(&next.position);
                if step.norm() < 1e-6 {
                    Direction::Forward
                } else if step.dot(&dominant) >= 0.0 {
                    Direction::Forward
                } else {
                    Direction::Backward
                }
            }
            _ => carried,
        };
        labels.push(label);
    }
    labels
}
