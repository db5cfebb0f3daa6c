//! Tabular I/O and audit artifacts.

pub mod svg_export;
pub mod tables;

pub use svg_export::{render_audit_svg, SvgConfig};
pub use tables::{
    load_image_gps, load_row_survey, load_vines, write_coverage_table, write_matched_table,
};
