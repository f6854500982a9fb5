//! Model constants as a runtime configuration.
//!
//! Defaults reproduce [`crate::constants`]; callers may override any of them
//! from JSON.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ModelError;

/// Unit conversions and numerical controls consumed by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub knots_to_mps: f64,
    pub nm_to_km: f64,
    pub earth_radius_km: f64,
    /// Newton–Raphson step tolerance.
    pub tolerance: f64,
    /// Newton–Raphson iteration cap.
    pub max_iterations: u32,
    /// Secondary decay length X2 (km).
    pub x2_km: f64,
    pub wide_transition_km: f64,
    pub narrow_transition_km: f64,
    /// The wide transition applies when `Rmax` is strictly greater than this.
    pub transition_threshold_km: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            knots_to_mps: KNOTS_TO_MPS,
            nm_to_km: NM_TO_KM,
            earth_radius_km: EARTH_RADIUS_KM,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
            x2_km: X2_KM,
            wide_transition_km: WIDE_TRANSITION_KM,
            narrow_transition_km: NARROW_TRANSITION_KM,
            transition_threshold_km: TRANSITION_THRESHOLD_KM,
        }
    }
}

impl ModelConfig {
    /// Parse a (possibly partial) JSON object; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let positive = [
            ("knots_to_mps", self.knots_to_mps),
            ("nm_to_km", self.nm_to_km),
            ("earth_radius_km", self.earth_radius_km),
            ("tolerance", self.tolerance),
            ("x2_km", self.x2_km),
            ("wide_transition_km", self.wide_transition_km),
            ("narrow_transition_km", self.narrow_transition_km),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.transition_threshold_km.is_finite() {
            return Err(ModelError::InvalidConfig(format!(
                "transition_threshold_km must be finite, got {}",
                self.transition_threshold_km
            )));
        }
        if self.max_iterations == 0 {
            return Err(ModelError::InvalidConfig("max_iterations must be at least 1".into()));
        }
        Ok(())
    }

    /// Transition zone width for a given `Rmax` (km).
    pub fn transition_width_km(&self, rmax_km: f64) -> f64 {
        if rmax_km > self.transition_threshold_km {
            self.wide_transition_km
        } else {
            self.narrow_transition_km
        }
    }
}
