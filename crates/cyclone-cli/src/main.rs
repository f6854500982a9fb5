//! Command-line harness: run the wind model for one storm over a regular
//! lon/lat grid and report or dump the resulting field.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cyclone_core::{Bounds, GridSpec, ModelConfig, ProfileParameters, StormState, WilloughbyModel, WindField};

#[derive(Parser, Debug)]
#[command(name = "cyclone-wind", about = "Parametric tropical cyclone surface wind field")]
struct Args {
    /// Storm state JSON. Defaults to the reference storm.
    #[arg(short, long)]
    storm: Option<PathBuf>,

    /// Model configuration JSON; missing keys keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid bounds as MIN_LON,MAX_LON,MIN_LAT,MAX_LAT (degrees).
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true,
          default_values_t = [-46.0, -34.0, -60.0, -50.0])]
    bounds: Vec<f64>,

    /// Grid cell size in degrees.
    #[arg(long, default_value_t = 0.1)]
    cell_size: f64,

    /// Write the field and derived parameters as JSON to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the per-cell breakdown for ROW,COL.
    #[arg(long, value_delimiter = ',')]
    trace: Option<Vec<usize>>,
}

#[derive(Serialize)]
struct Output<'a> {
    params: &'a ProfileParameters,
    chi: f64,
    converged: bool,
    field: &'a WindField,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let storm: StormState = match &args.storm {
        Some(path) => read_json(path)?,
        None => StormState::reference(),
    };
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ModelConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ModelConfig::default(),
    };

    let [min_lon, max_lon, min_lat, max_lat] = args.bounds[..] else {
        bail!("--bounds takes exactly four values");
    };
    let grid = GridSpec::from_bounds(Bounds { min_lon, max_lon, min_lat, max_lat }, args.cell_size)
        .context("building grid")?;
    info!(width = grid.width, height = grid.height, "grid ready");

    let model = WilloughbyModel::new(config);
    let run = model.run(&storm, &grid).context("running wind model")?;
    if !run.converged() {
        warn!("blend zone placement used an unconverged estimate");
    }

    let p = &run.params;
    println!("Vmax {:.2} m/s  Rmax {:.2} km  cs {:.2} m/s", p.vmax_mps, p.rmax_km, p.translation_mps);
    println!("X1 {:.2} km  X2 {:.2} km  n {:.4}  A {:.4}", p.x1_km, p.x2_km, p.n, p.a);
    println!("R1 {:.2} km  R2 {:.2} km  chi {:.2}°", p.r1_km, p.r2_km, run.chi);
    println!(
        "speed min {:.2}  mean {:.2}  max {:.2} m/s over {}x{} cells",
        run.field.min_speed(),
        run.field.mean_speed(),
        run.field.max_speed(),
        run.field.width,
        run.field.height
    );

    if let Some(cell) = &args.trace {
        let [row, col] = cell[..] else {
            bail!("--trace takes ROW,COL");
        };
        let sample = model.sample_cell(&storm, &grid, row, col)?;
        println!("{}", serde_json::to_string_pretty(&sample)?);
    }

    if let Some(path) = &args.output {
        let out = Output { params: p, chi: run.chi, converged: run.converged(), field: &run.field };
        let json = serde_json::to_string(&out)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "field written");
    }

    Ok(())
}
