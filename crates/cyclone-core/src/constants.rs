//! Unit conversions and numeric defaults.
//!
//! Every conversion between knots, nautical miles, kilometres and metres per
//! second happens through these names; the physics modules only ever see
//! m/s, km and degrees.

/// Knots → metres per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// Nautical miles → kilometres.
pub const NM_TO_KM: f64 = 1.852;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Newton–Raphson step tolerance for the blend-zone solve.
pub const TOLERANCE: f64 = 1e-6;

/// Newton–Raphson iteration cap.
pub const MAX_ITERATIONS: u32 = 1000;

/// Secondary exponential decay length (km), Willoughby et al. (2006).
pub const X2_KM: f64 = 25.0;

/// Transition zone width (km) when `Rmax` exceeds [`TRANSITION_THRESHOLD_KM`].
pub const WIDE_TRANSITION_KM: f64 = 25.0;

/// Transition zone width (km) otherwise.
pub const NARROW_TRANSITION_KM: f64 = 10.0;

/// `Rmax` (km) above which the wide transition applies.
pub const TRANSITION_THRESHOLD_KM: f64 = 20.0;

/// Largest grid `GridSpec::from_bounds` will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 28;
