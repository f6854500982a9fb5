use serde::{Deserialize, Serialize};

use super::params::ProfileParameters;
use crate::smoothstep::SmoothStep;

/// Which branch of the piecewise profile applies at a given range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// `range <= R1`: power law rising towards the eyewall.
    Inner,
    /// `R1 < range < R2`: smooth-step blend of the two neighbours.
    Blend,
    /// `range >= R2`: double exponential decay.
    Exterior,
}

impl ProfileParameters {
    pub fn regime(&self, range_km: f64) -> Regime {
        if range_km <= self.r1_km {
            Regime::Inner
        } else if range_km < self.r2_km {
            Regime::Blend
        } else {
            Regime::Exterior
        }
    }

    /// Inner power law `Vmax·(r/Rmax)^n`.
    #[inline]
    pub fn inner_speed(&self, range_km: f64) -> f64 {
        self.vmax_mps * (range_km / self.rmax_km).powf(self.n)
    }

    /// Exterior reference speed `V0`.
    #[inline]
    pub fn exterior_speed(&self, range_km: f64) -> f64 {
        let excess = range_km - self.rmax_km;
        self.vmax_mps
            * ((1.0 - self.a) * (-excess / self.x1_km).exp() + self.a * (-excess / self.x2_km).exp())
    }

    /// Blend weight inside the transition zone.
    #[inline]
    pub fn blend_weight(&self, range_km: f64) -> f64 {
        SmoothStep::evaluate((range_km - self.r1_km) / (self.r2_km - self.r1_km))
    }

    /// Axisymmetric wind speed (m/s) at `range_km` from the eye.
    pub fn symmetric_speed(&self, range_km: f64) -> f64 {
        match self.regime(range_km) {
            Regime::Inner => self.inner_speed(range_km),
            Regime::Blend => {
                let w = self.blend_weight(range_km);
                self.inner_speed(range_km) * (1.0 - w) + self.exterior_speed(range_km) * w
            }
            Regime::Exterior => self.exterior_speed(range_km),
        }
    }
}
