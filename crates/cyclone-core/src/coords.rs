//! Geographic coordinate type shared by the storm state and the grid.
//! All coordinate math uses f64 for precision.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelError};

/// A point on the sphere in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees, -90 to +90.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }

    /// Finite coordinates with latitude inside [-90, 90].
    pub fn validate(self, what: &'static str) -> Result<Self, ModelError> {
        ensure_finite(what, self.lat)?;
        ensure_finite(what, self.lon)?;
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ModelError::LatitudeOutOfRange(self.lat));
        }
        Ok(self)
    }
}
