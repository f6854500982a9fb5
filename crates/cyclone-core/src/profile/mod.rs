//! Willoughby et al. (2006) radial wind profile.
//!
//! `params` derives the per-storm shape once; `radial` evaluates the
//! axisymmetric speed at any range from the eye.

pub mod params;
pub mod radial;

pub use params::ProfileParameters;
pub use radial::Regime;
