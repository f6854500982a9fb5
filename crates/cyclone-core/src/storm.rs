//! Storm state as supplied by the caller, in operational units.

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::coords::LatLon;
use crate::error::{ensure_finite, ModelError};
use crate::geodesy::{initial_bearing, normalize_bearing, storm_heading};

/// How the direction of travel is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StormMotion {
    /// Next track point; the heading is the initial great-circle bearing to it.
    Toward(LatLon),
    /// Precomputed true course in degrees clockwise from north.
    Heading { degrees: f64 },
}

/// Immutable storm parameters for one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormState {
    pub eye: LatLon,
    pub motion: StormMotion,
    /// Forward speed of the eye, knots.
    pub translation_speed_kt: f64,
    /// Peak sustained wind, knots.
    pub peak_wind_kt: f64,
    /// Radius of maximum wind, nautical miles.
    pub radius_max_wind_nm: f64,
}

impl StormState {
    /// The storm used throughout the model's reference runs: eye at 55°S 40°W
    /// heading for 55.8°N 39.5°W at 18 kt, 125.3 kt peak wind, 22.3 nm `Rmax`.
    pub fn reference() -> Self {
        Self {
            eye: LatLon::new(-55.0, -40.0),
            motion: StormMotion::Toward(LatLon::new(55.8, -39.5)),
            translation_speed_kt: 18.0,
            peak_wind_kt: 125.3,
            radius_max_wind_nm: 22.3,
        }
    }

    /// Raw bearing of travel in (-180, 180].
    pub fn bearing(&self) -> f64 {
        match self.motion {
            StormMotion::Toward(next) => initial_bearing(self.eye, next),
            StormMotion::Heading { degrees } => normalize_bearing(degrees),
        }
    }

    /// Storm heading `chi` after the quadrant remap.
    pub fn heading(&self) -> f64 {
        storm_heading(self.bearing())
    }

    pub fn translation_speed_mps(&self, config: &ModelConfig) -> f64 {
        self.translation_speed_kt * config.knots_to_mps
    }

    pub fn radius_max_wind_km(&self, config: &ModelConfig) -> f64 {
        self.radius_max_wind_nm * config.nm_to_km
    }

    /// Check every precondition the profile equations rely on.
    pub fn validate(&self, config: &ModelConfig) -> Result<(), ModelError> {
        self.eye.validate("eye position")?;
        match self.motion {
            StormMotion::Toward(next) => {
                next.validate("next track point")?;
            }
            StormMotion::Heading { degrees } => {
                ensure_finite("heading", degrees)?;
            }
        }

        let translation = ensure_finite("translation speed", self.translation_speed_kt)?;
        if translation < 0.0 {
            return Err(ModelError::NegativeTranslation(translation));
        }
        ensure_finite("peak wind", self.peak_wind_kt)?;
        ensure_finite("radius of maximum wind", self.radius_max_wind_nm)?;

        let rmax_km = self.radius_max_wind_km(config);
        if rmax_km <= 0.0 {
            return Err(ModelError::NonPositiveRmax(rmax_km));
        }

        let translation_mps = self.translation_speed_mps(config);
        let peak_mps = self.peak_wind_kt * config.knots_to_mps;
        if peak_mps - translation_mps <= 0.0 {
            return Err(ModelError::NonPositiveVmax { peak_mps, translation_mps });
        }
        Ok(())
    }
}
