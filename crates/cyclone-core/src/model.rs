//! Grid evaluation: one profile derivation, then an independent pass per cell.

#[cfg(feature = "threading")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::asymmetry::{correct, inflow_angle};
use crate::config::ModelConfig;
use crate::coords::LatLon;
use crate::error::ModelError;
use crate::geodesy::{bearing_from_eye, haversine_range_km, relative_bearing};
use crate::grid::{GridSpec, WindField};
use crate::profile::{ProfileParameters, Regime};
use crate::storm::StormState;

// ── Per-cell diagnostics ──────────────────────────────────────────────────────

/// Everything computed for one cell. Debugging aid, not part of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellSample {
    pub range_km: f64,
    /// Angle from the eye to the cell, degrees from the longitudinal direction.
    pub phi: f64,
    /// Cell bearing relative to storm motion, degrees.
    pub theta: f64,
    pub regime: Regime,
    /// Axisymmetric profile speed before correction, m/s.
    pub symmetric_speed: f64,
    pub inflow_angle: f64,
    pub u: f64,
    pub v: f64,
    /// Final speed written to the field, m/s.
    pub speed: f64,
}

// ── Run output ────────────────────────────────────────────────────────────────

/// Result of one model run. The caller owns the field.
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub field: WindField,
    pub params: ProfileParameters,
    /// Raw bearing of travel, degrees in (-180, 180].
    pub bearing: f64,
    /// Storm heading `chi` after the quadrant remap.
    pub chi: f64,
}

impl ModelRun {
    /// False when the blend-zone solve hit its iteration cap.
    pub fn converged(&self) -> bool {
        self.params.blend_solution.converged
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// Willoughby–Phadke parametric surface wind model.
#[derive(Debug, Clone, Default)]
pub struct WilloughbyModel {
    pub config: ModelConfig,
}

impl WilloughbyModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Validate inputs, derive the profile once, and fill a fresh field.
    ///
    /// Cells are independent; with the `threading` feature they are
    /// evaluated in parallel into disjoint slots of the output buffer.
    pub fn run(&self, storm: &StormState, grid: &GridSpec) -> Result<ModelRun, ModelError> {
        grid.validate()?;
        let params = ProfileParameters::derive(storm, &self.config)?;
        let bearing = storm.bearing();
        let chi = storm.heading();
        debug!(bearing, chi, "storm heading");

        let mut field = WindField::for_grid(grid);
        let eye = storm.eye;
        let evaluate = |(i, slot): (usize, &mut f32)| {
            *slot = self.evaluate_cell(&params, eye, chi, grid.cell(i)).speed as f32;
        };

        #[cfg(feature = "threading")]
        field.data.par_iter_mut().enumerate().for_each(evaluate);
        #[cfg(not(feature = "threading"))]
        field.data.iter_mut().enumerate().for_each(evaluate);

        info!(
            cells = grid.len(),
            max_speed = field.max_speed(),
            converged = params.blend_solution.converged,
            "wind field evaluated"
        );

        Ok(ModelRun { field, params, bearing, chi })
    }

    /// Full diagnostic breakdown for the cell at `(row, col)`.
    pub fn sample_cell(
        &self,
        storm: &StormState,
        grid: &GridSpec,
        row: usize,
        col: usize,
    ) -> Result<CellSample, ModelError> {
        grid.validate()?;
        if row >= grid.height || col >= grid.width {
            return Err(ModelError::CellOutOfRange { row, col, width: grid.width, height: grid.height });
        }
        let params = ProfileParameters::derive(storm, &self.config)?;
        let chi = storm.heading();
        let sample = self.evaluate_cell(&params, storm.eye, chi, grid.cell(grid.index(row, col)));
        trace!(row, col, range_km = sample.range_km, chi, theta = sample.theta, "cell sample");
        Ok(sample)
    }

    fn evaluate_cell(&self, params: &ProfileParameters, eye: LatLon, chi: f64, cell: LatLon) -> CellSample {
        let phi = bearing_from_eye(eye, cell);
        let theta = relative_bearing(phi, chi);
        let range_km = haversine_range_km(eye, cell, self.config.earth_radius_km);

        let symmetric_speed = params.symmetric_speed(range_km);
        let wind = correct(symmetric_speed, range_km, theta, params.rmax_km, params.translation_mps);

        CellSample {
            range_km,
            phi,
            theta,
            regime: params.regime(range_km),
            symmetric_speed,
            inflow_angle: inflow_angle(range_km, params.rmax_km),
            u: wind.u,
            v: wind.v,
            speed: wind.speed,
        }
    }
}
