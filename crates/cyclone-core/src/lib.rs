//! Parametric surface wind field for a tropical cyclone.
//!
//! Willoughby et al. (2006) radial profile with the Phadke et al. (2003)
//! translation and inflow corrections, evaluated over a geographic grid.
//!
//! Pipeline: [`StormState`] → [`ProfileParameters`] (once) → per cell
//! [`geodesy`] → radial profile → [`asymmetry`] → [`WindField`].

pub mod asymmetry;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod geodesy;
pub mod grid;
pub mod model;
pub mod profile;
pub mod smoothstep;
pub mod storm;

pub use config::ModelConfig;
pub use coords::LatLon;
pub use error::ModelError;
pub use grid::{Bounds, GridSpec, WindField};
pub use model::{CellSample, ModelRun, WilloughbyModel};
pub use profile::{ProfileParameters, Regime};
pub use smoothstep::{SmoothStep, Solution};
pub use storm::{StormMotion, StormState};
