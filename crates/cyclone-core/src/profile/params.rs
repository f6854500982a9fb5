use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::error::{ensure_finite, ModelError};
use crate::smoothstep::{SmoothStep, Solution};
use crate::storm::StormState;

/// Shape of the radial profile for one storm. Derived once, read-only after.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileParameters {
    /// Storm translation speed `cs`, m/s.
    pub translation_mps: f64,
    /// Peak wind with translation removed, m/s.
    pub vmax_mps: f64,
    /// Radius of maximum wind, km.
    pub rmax_km: f64,
    /// Primary exterior decay length, km.
    pub x1_km: f64,
    /// Secondary exterior decay length, km.
    pub x2_km: f64,
    /// Inner power-law exponent.
    pub n: f64,
    /// Share of the secondary decay, never negative.
    pub a: f64,
    /// Inner edge of the blend zone, km.
    pub r1_km: f64,
    /// Outer edge of the blend zone, km. Always `r1_km + width`.
    pub r2_km: f64,
    /// Blend weight at `Rmax` that the zone placement inverts.
    pub blend_target: f64,
    #[serde(skip)]
    pub blend_solution: Solution,
    /// True when the solved blend position had to be pinned into [0, 1].
    pub blend_clamped: bool,
}

impl ProfileParameters {
    /// Derive the profile from a storm given in knots and nautical miles.
    pub fn derive(storm: &StormState, config: &ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;
        storm.validate(config)?;

        // Phadke et al. (2003): the translation component is removed from the
        // observed peak before fitting the profile.
        let cs = storm.translation_speed_mps(config);
        let vmax = storm.peak_wind_kt * config.knots_to_mps - cs;
        let rmax = storm.radius_max_wind_km(config);

        Self::from_physical(vmax, rmax, storm.eye.lat, cs, config)
    }

    /// Derive the profile from values already in m/s and km.
    pub fn from_physical(
        vmax_mps: f64,
        rmax_km: f64,
        eye_lat: f64,
        translation_mps: f64,
        config: &ModelConfig,
    ) -> Result<Self, ModelError> {
        ensure_finite("Vmax", vmax_mps)?;
        ensure_finite("Rmax", rmax_km)?;
        ensure_finite("eye latitude", eye_lat)?;
        ensure_finite("translation speed", translation_mps)?;
        if rmax_km <= 0.0 {
            return Err(ModelError::NonPositiveRmax(rmax_km));
        }
        if vmax_mps <= 0.0 {
            return Err(ModelError::NonPositiveVmax {
                peak_mps: vmax_mps + translation_mps,
                translation_mps,
            });
        }
        if !(-90.0..=90.0).contains(&eye_lat) {
            return Err(ModelError::LatitudeOutOfRange(eye_lat));
        }

        let ln_rmax = rmax_km.ln();

        // Equations 11(a)-(c).
        let x1 = 287.6 - 1.942 * vmax_mps + 7.799 * ln_rmax + 1.1819 * eye_lat;
        let x2 = config.x2_km;
        let n = 2.134 + 0.0077 * vmax_mps - 0.4522 * ln_rmax - 0.0038 * eye_lat;
        let a = (0.5913 + 0.0029 * vmax_mps - 0.1361 * ln_rmax - 0.0042 * eye_lat).max(0.0);

        let decay = n * ((1.0 - a) * x1 + a * x2);
        let blend_target = decay / (decay + rmax_km);

        let solver = SmoothStep::new(config.tolerance, config.max_iterations);
        let blend_solution = solver.solve(blend_target);
        // S is monotone, so a target outside [0, 1] puts the root outside too.
        // Pinning xi keeps R1 <= Rmax <= R2.
        let (xi, blend_clamped) = if blend_target < 0.0 {
            (0.0, true)
        } else if blend_target > 1.0 {
            (1.0, true)
        } else {
            let xi = blend_solution.x.clamp(0.0, 1.0);
            (xi, xi != blend_solution.x)
        };
        if blend_clamped {
            warn!(
                blend_target,
                solved = blend_solution.x,
                xi,
                n,
                "blend zone pinned to Rmax; storm lies outside the fitted profile range"
            );
        }

        let width = config.transition_width_km(rmax_km);
        let r1 = rmax_km - width * xi;
        let r2 = r1 + width;

        debug!(
            vmax_mps, rmax_km, x1, n, a, r1, r2,
            iterations = blend_solution.iterations,
            "derived wind profile"
        );

        Ok(Self {
            translation_mps,
            vmax_mps,
            rmax_km,
            x1_km: x1,
            x2_km: x2,
            n,
            a,
            r1_km: r1,
            r2_km: r2,
            blend_target,
            blend_solution,
            blend_clamped,
        })
    }

    /// Width of the blend zone, km.
    pub fn transition_width_km(&self) -> f64 {
        self.r2_km - self.r1_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{KNOTS_TO_MPS, NM_TO_KM};
    use approx::assert_abs_diff_eq;

    fn cfg() -> ModelConfig {
        ModelConfig::default()
    }

    #[test]
    fn reference_storm_closed_form() {
        let p = ProfileParameters::derive(&StormState::reference(), &cfg()).unwrap();

        let cs = 18.0 * KNOTS_TO_MPS;
        let vmax = 125.3 * KNOTS_TO_MPS - cs;
        let rmax = 22.3 * NM_TO_KM;
        let lat = -55.0;

        assert_abs_diff_eq!(p.translation_mps, cs, epsilon = 1e-12);
        assert_abs_diff_eq!(p.vmax_mps, vmax, epsilon = 1e-12);
        assert_abs_diff_eq!(p.rmax_km, rmax, epsilon = 1e-12);
        assert_abs_diff_eq!(
            p.x1_km,
            287.6 - 1.942 * vmax + 7.799 * rmax.ln() + 1.1819 * lat,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(p.n, 2.134 + 0.0077 * vmax - 0.4522 * rmax.ln() - 0.0038 * lat, epsilon = 1e-12);
        assert_abs_diff_eq!(p.a, 0.5913 + 0.0029 * vmax - 0.1361 * rmax.ln() - 0.0042 * lat, epsilon = 1e-12);
        assert_eq!(p.x2_km, 25.0);
        assert!(p.blend_solution.converged);
    }

    #[test]
    fn blend_solution_reproduces_target_weight() {
        let p = ProfileParameters::derive(&StormState::reference(), &cfg()).unwrap();
        let xi = (p.rmax_km - p.r1_km) / p.transition_width_km();
        assert_abs_diff_eq!(SmoothStep::evaluate(xi), p.blend_target, epsilon = 1e-6);
    }

    #[test]
    fn transition_radii_bracket_rmax() {
        for rmax in [1.0, 5.0, 10.0, 19.9, 20.0, 20.1, 41.3, 80.0, 150.0, 400.0] {
            let p = ProfileParameters::from_physical(50.0, rmax, 20.0, 5.0, &cfg()).unwrap();
            let width = if rmax > 20.0 { 25.0 } else { 10.0 };
            assert!(p.r1_km <= rmax && rmax <= p.r2_km, "rmax={rmax}: [{}, {}]", p.r1_km, p.r2_km);
            assert_abs_diff_eq!(p.transition_width_km(), width, epsilon = 1e-9);
        }
    }

    #[test]
    fn rmax_exactly_twenty_uses_narrow_zone() {
        let p = ProfileParameters::from_physical(50.0, 20.0, 20.0, 5.0, &cfg()).unwrap();
        assert_abs_diff_eq!(p.r2_km - p.r1_km, 10.0, epsilon = 1e-12);
        let p = ProfileParameters::from_physical(50.0, 20.0 + 1e-9, 20.0, 5.0, &cfg()).unwrap();
        assert_abs_diff_eq!(p.r2_km - p.r1_km, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_mixing_fraction_clamped_to_zero() {
        let (vmax, rmax, lat) = (30.0, 60.0, 60.0);
        let raw = 0.5913 + 0.0029 * vmax - 0.1361 * f64::ln(rmax) - 0.0042 * lat;
        assert!(raw < 0.0);
        let p = ProfileParameters::from_physical(vmax, rmax, lat, 0.0, &cfg()).unwrap();
        assert_eq!(p.a, 0.0);
    }

    #[test]
    fn negative_exponent_pins_blend_zone_to_rmax() {
        // Weak, broad, high-latitude storm: n < 0 and the blend target goes negative.
        let vmax = 45.0 * KNOTS_TO_MPS;
        let rmax = 80.0 * NM_TO_KM;
        let p = ProfileParameters::from_physical(vmax, rmax, 60.0, 0.0, &cfg()).unwrap();
        assert!(p.n < 0.0);
        assert!(p.blend_target < 0.0);
        assert!(p.blend_clamped);
        assert_eq!(p.r1_km, rmax);
        assert_abs_diff_eq!(p.r2_km, rmax + 25.0, epsilon = 1e-12);
    }

    #[test]
    fn ordinary_storm_is_not_clamped() {
        let p = ProfileParameters::derive(&StormState::reference(), &cfg()).unwrap();
        assert!(!p.blend_clamped);
    }

    #[test]
    fn non_positive_rmax_fails_fast() {
        assert_eq!(
            ProfileParameters::from_physical(50.0, 0.0, 20.0, 5.0, &cfg()).unwrap_err(),
            ModelError::NonPositiveRmax(0.0)
        );
        assert!(ProfileParameters::from_physical(50.0, -3.0, 20.0, 5.0, &cfg()).is_err());
    }

    #[test]
    fn invalid_config_fails_before_storm() {
        let bad = ModelConfig { max_iterations: 0, ..cfg() };
        assert!(matches!(
            ProfileParameters::derive(&StormState::reference(), &bad),
            Err(ModelError::InvalidConfig(_))
        ));
    }
}
