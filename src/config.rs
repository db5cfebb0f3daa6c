//! Pipeline configuration loading.
//!
//! All tunables are plain numeric constants fed into the pipeline; they can
//! be loaded from a TOML file and individually overridden on the command
//! line.

use serde::Deserialize;
use std::path::Path;

use crate::error::{DrakshaError, Result};

/// Top-level pipeline configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct PipelineConfig {
    /// Lateral camera offset, meters left of the travel direction.
    #[serde(default = "default_camera_offset")]
    pub camera_offset_m: f64,

    /// Full camera field-of-view angle in degrees.
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f64,

    /// Snap surveyed vine positions onto their row line before coverage.
    #[serde(default)]
    pub snap_vines: bool,

    /// Coverage-interval tuning.
    #[serde(default)]
    pub coverage: CoverageSettings,
}

/// Coverage-interval tuning (meters along the row centerline).
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CoverageSettings {
    /// Extension past the first/last vine of a row.
    #[serde(default = "default_extend_first_last")]
    pub extend_first_last: f64,

    /// Extension across a vine-id numbering gap.
    #[serde(default = "default_extend_not_continuous")]
    pub extend_not_continuous: f64,

    /// Cap on the half-spacing extension between id-adjacent vines.
    #[serde(default = "default_max_half_extend")]
    pub max_half_extend: f64,
}

fn default_camera_offset() -> f64 {
    0.76
}

fn default_fov_degrees() -> f64 {
    60.5
}

fn default_extend_first_last() -> f64 {
    0.5
}

fn default_extend_not_continuous() -> f64 {
    1.0
}

fn default_max_half_extend() -> f64 {
    1.2
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            camera_offset_m: default_camera_offset(),
            fov_degrees: default_fov_degrees(),
            snap_vines: false,
            coverage: CoverageSettings::default(),
        }
    }
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            extend_first_last: default_extend_first_last(),
            extend_not_continuous: default_extend_not_continuous(),
            max_half_extend: default_max_half_extend(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DrakshaError::Config(format!("failed to read config file: {}", e)))?;
        let config: PipelineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_relative_eq!(cfg.camera_offset_m, 0.76);
        assert_relative_eq!(cfg.fov_degrees, 60.5);
        assert_relative_eq!(cfg.coverage.extend_first_last, 0.5);
        assert_relative_eq!(cfg.coverage.extend_not_continuous, 1.0);
        assert_relative_eq!(cfg.coverage.max_half_extend, 1.2);
        assert!(!cfg.snap_vines);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: PipelineConfig = toml::from_str(
            r#"
            fov_degrees = 70.0

            [coverage]
            max_half_extend = 0.9
            "#,
        )
        .unwrap();
        assert_relative_eq!(cfg.fov_degrees, 70.0);
        assert_relative_eq!(cfg.camera_offset_m, 0.76);
        assert_relative_eq!(cfg.coverage.max_half_extend, 0.9);
        assert_relative_eq!(cfg.coverage.extend_first_last, 0.5);
    }
}
