//! Pipeline entry point: image segregation based on geo-reference data.
//!
//! Reads the row survey, image GPS log, and grapevine tables, runs the
//! geometric inference chain, and writes the grapevine coverage table and
//! the final matched table.
//!
//! ```bash
//! draksha-fov --rows Row_SE_GPS.csv --gps Image_GPS.csv --vines Grapevines.csv \
//!     --coverage-out Grapevines_with_Coverage.csv \
//!     --out Image_GPS_FOV_matched_vines.csv
//!
//! # with an audit image of 25 sampled FOV wedges
//! draksha-fov ... --audit-svg run.svg --fov-samples 25
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;

use draksha_fov::io::svg_export::SvgConfig;
use draksha_fov::{io, pipeline, PipelineConfig, Result, RowRegistry};

/// Match robot camera FOV footprints to surveyed grapevines.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Row survey table (Row, ID, Longitude, Latitude)
    #[arg(long)]
    rows: PathBuf,

    /// Image GPS log (Image_ID, Longitude, Latitude)
    #[arg(long)]
    gps: PathBuf,

    /// Grapevine position table (Row, ID, Longitude, Latitude)
    #[arg(long)]
    vines: PathBuf,

    /// Output path for the grapevine coverage table
    #[arg(long)]
    coverage_out: PathBuf,

    /// Output path for the final matched table
    #[arg(long)]
    out: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lateral camera offset in meters (overrides config)
    #[arg(long)]
    offset: Option<f64>,

    /// Full FOV angle in degrees (overrides config)
    #[arg(long)]
    fov: Option<f64>,

    /// Snap vine positions onto their row line before coverage
    #[arg(long)]
    snap_vines: bool,

    /// Write an SVG audit rendering of the run
    #[arg(long)]
    audit_svg: Option<PathBuf>,

    /// Number of FOV wedges to draw in the audit SVG
    #[arg(long, default_value_t = 0)]
    fov_samples: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            PipelineConfig::load(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(offset) = args.offset {
        config.camera_offset_m = offset;
    }
    if let Some(fov) = args.fov {
        config.fov_degrees = fov;
    }
    if args.snap_vines {
        config.snap_vines = true;
    }

    log::info!("loading row survey from {}", args.rows.display());
    let survey = io::load_row_survey(&args.rows)?;
    let registry = RowRegistry::from_survey(&survey)?;
    log::info!("registry holds {} rows", registry.len());

    log::info!("loading image GPS log from {}", args.gps.display());
    let samples = io::load_image_gps(&args.gps)?;

    log::info!("loading grapevines from {}", args.vines.display());
    let vines = io::load_vines(&args.vines)?;

    let output = pipeline::run(samples, vines, &registry, &config)?;

    io::write_coverage_table(&args.coverage_out, &output.coverage)?;
    log::info!("coverage table written to {}", args.coverage_out.display());

    io::write_matched_table(&args.out, &output.images)?;
    log::info!("matched table written to {}", args.out.display());

    if let Some(svg_path) = &args.audit_svg {
        let svg_config = SvgConfig {
            fov_samples: args.fov_samples,
            ..SvgConfig::default()
        };
        io::render_audit_svg(svg_path, &registry, &output.images, &output.coverage, &svg_config)?;
        log::info!("audit SVG written to {}", svg_path.display());
    }

    Ok(())
}
