//! Translation asymmetry and inflow rotation (Phadke et al., 2003, eq. 12).
//!
//! The axisymmetric speed is rotated by the inflow angle into `<u, v>`
//! components, scaled by the radial correction factor, and the storm's own
//! forward motion is added on the side it travels towards.

use serde::Serialize;

/// Inflow angle `beta` in degrees for a cell at `range_km`.
pub fn inflow_angle(range_km: f64, rmax_km: f64) -> f64 {
    let ratio = range_km / rmax_km;
    if range_km < rmax_km {
        10.0 * (1.0 + ratio)
    } else if range_km < 1.2 * rmax_km {
        20.0 + 25.0 * (ratio - 1.0)
    } else {
        25.0
    }
}

/// `2·Rmax·r / (Rmax² + r²)`: 1 at the eyewall, falling to 0 at the eye and
/// far field. `rmax_km` is positive, so the denominator never vanishes.
#[inline]
pub fn correction_factor(range_km: f64, rmax_km: f64) -> f64 {
    (2.0 * rmax_km * range_km) / (rmax_km * rmax_km + range_km * range_km)
}

/// Wind at one cell after the asymmetry correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectedWind {
    /// Scaled rotated component along `theta + beta`.
    pub u: f64,
    pub v: f64,
    /// Translation addend `cf·cs·cos(theta)`.
    pub asymmetry: f64,
    /// Final scalar speed, m/s, never negative.
    pub speed: f64,
}

/// Apply inflow rotation, radial scaling and the translation addend.
///
/// `theta_deg` is the cell bearing relative to storm motion; `translation_mps`
/// is the storm's forward speed `cs`.
pub fn correct(
    symmetric_mps: f64,
    range_km: f64,
    theta_deg: f64,
    rmax_km: f64,
    translation_mps: f64,
) -> CorrectedWind {
    // The eye has no direction and the inner power law may be singular there
    // (0^n with n < 0); it is calm by definition.
    if range_km == 0.0 {
        return CorrectedWind { u: 0.0, v: 0.0, asymmetry: 0.0, speed: 0.0 };
    }

    let beta = inflow_angle(range_km, rmax_km);
    let direction = (theta_deg + beta).rem_euclid(360.0).to_radians();
    let cf = correction_factor(range_km, rmax_km);

    let u = cf * symmetric_mps * direction.cos();
    let v = cf * symmetric_mps * direction.sin();
    let asymmetry = cf * translation_mps * theta_deg.to_radians().cos();

    // The scalar recombination dips below zero far behind a fast storm.
    // NaN is not absorbed here so bad inputs stay visible.
    let raw = u.hypot(v) + asymmetry;
    let speed = if raw < 0.0 { 0.0 } else { raw };

    CorrectedWind { u, v, asymmetry, speed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const RMAX: f64 = 40.0;

    #[test]
    fn inflow_angle_regimes() {
        assert_abs_diff_eq!(inflow_angle(0.0, RMAX), 10.0);
        assert_abs_diff_eq!(inflow_angle(20.0, RMAX), 15.0);
        assert_abs_diff_eq!(inflow_angle(RMAX, RMAX), 20.0);
        assert_abs_diff_eq!(inflow_angle(1.1 * RMAX, RMAX), 22.5, epsilon = 1e-9);
        assert_abs_diff_eq!(inflow_angle(1.2 * RMAX, RMAX), 25.0);
        assert_abs_diff_eq!(inflow_angle(10.0 * RMAX, RMAX), 25.0);
    }

    #[test]
    fn inflow_angle_continuous_at_1_2_rmax() {
        let just_below = inflow_angle(1.2 * RMAX - 1e-9, RMAX);
        assert_abs_diff_eq!(just_below, 25.0, epsilon = 1e-6);
    }

    #[test]
    fn correction_factor_peaks_at_rmax() {
        assert_eq!(correction_factor(0.0, RMAX), 0.0);
        assert_abs_diff_eq!(correction_factor(RMAX, RMAX), 1.0, epsilon = 1e-12);
        assert!(correction_factor(0.5 * RMAX, RMAX) < 1.0);
        assert!(correction_factor(2.0 * RMAX, RMAX) < 1.0);
    }

    #[test]
    fn eye_is_calm_without_nan() {
        let w = correct(0.0, 0.0, 0.0, RMAX, 9.0);
        assert_eq!(w.speed, 0.0);
        assert_eq!(w.asymmetry, 0.0);
        assert!(w.u.is_finite() && w.v.is_finite());
    }

    #[test]
    fn eye_is_calm_even_with_singular_profile() {
        let w = correct(f64::INFINITY, 0.0, 90.0, RMAX, 9.0);
        assert_eq!(w, CorrectedWind { u: 0.0, v: 0.0, asymmetry: 0.0, speed: 0.0 });
    }

    #[test]
    fn nan_profile_is_not_hidden_as_calm() {
        let w = correct(f64::NAN, 30.0, 0.0, RMAX, 5.0);
        assert!(w.speed.is_nan());
    }

    #[test]
    fn stationary_storm_reduces_to_symmetric_scaled_speed() {
        for theta in [-90.0, 0.0, 45.0, 170.0, 300.0] {
            let w = correct(50.0, 60.0, theta, RMAX, 0.0);
            assert_eq!(w.asymmetry, 0.0);
            assert_abs_diff_eq!(w.speed, correction_factor(60.0, RMAX) * 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn rotation_uses_theta_plus_inflow() {
        // theta + beta = 90° puts the whole wind in v.
        let w = correct(30.0, RMAX, 70.0, RMAX, 0.0);
        assert_abs_diff_eq!(w.u, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(w.v, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn translation_adds_ahead_and_subtracts_behind() {
        let ahead = correct(40.0, RMAX, 0.0, RMAX, 10.0);
        let behind = correct(40.0, RMAX, 180.0, RMAX, 10.0);
        assert_abs_diff_eq!(ahead.speed, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(behind.speed, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn speed_never_negative() {
        let w = correct(2.0, 400.0, 180.0, RMAX, 15.0);
        assert!(w.asymmetry < 0.0);
        assert_eq!(w.speed, 0.0);
    }
}
