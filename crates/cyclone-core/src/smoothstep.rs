//! Ninth-degree smooth step used to blend the inner and outer wind profiles.
//!
//! `S(x) = 126x⁵ − 420x⁶ + 540x⁷ − 315x⁸ + 70x⁹` rises from 0 to 1 on [0, 1]
//! with vanishing first and second derivatives at both ends. The same
//! polynomial is evaluated directly inside the blend zone and inverted once
//! per storm to place the zone around `Rmax`.

use tracing::warn;

/// Outcome of a Newton–Raphson inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Best available root estimate.
    pub x: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// False when the iteration cap was hit before the step fell below tolerance.
    pub converged: bool,
}

/// The smooth-step polynomial together with its Newton–Raphson inverse.
#[derive(Debug, Clone, Copy)]
pub struct SmoothStep {
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SmoothStep {
    fn default() -> Self {
        Self {
            tolerance: crate::constants::TOLERANCE,
            max_iterations: crate::constants::MAX_ITERATIONS,
        }
    }
}

impl SmoothStep {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self { tolerance, max_iterations }
    }

    /// `S(x)`, Horner form.
    #[inline]
    pub fn evaluate(x: f64) -> f64 {
        let x5 = x.powi(5);
        x5 * (126.0 + x * (-420.0 + x * (540.0 + x * (-315.0 + x * 70.0))))
    }

    /// `S'(x) = 630x⁴ − 2520x⁵ + 3780x⁶ − 2520x⁷ + 630x⁸ = 630·x⁴·(1 − x)⁴`.
    #[inline]
    pub fn derivative(x: f64) -> f64 {
        630.0 * (x * (1.0 - x)).powi(4)
    }

    /// Find `x` with `S(x) = target_weight` by Newton–Raphson from `x₀ = 0.5`.
    ///
    /// `S(1 − x) = 1 − S(x)`, so targets above one half are solved as
    /// `1 − solve(1 − target_weight)`. Both ends are fifth-order roots; reflecting
    /// keeps the iterate near 0, where the polynomial carries no cancellation.
    ///
    /// Hitting the iteration cap is not fatal: the last iterate is returned
    /// with `converged = false` and a warning is logged.
    pub fn solve(&self, target_weight: f64) -> Solution {
        let solution = if target_weight > 0.5 {
            let reflected = self.newton(1.0 - target_weight);
            Solution { x: 1.0 - reflected.x, ..reflected }
        } else {
            self.newton(target_weight)
        };

        if !solution.converged {
            warn!(
                target_weight,
                x = solution.x,
                iterations = solution.iterations,
                "smooth-step inversion did not converge"
            );
        }
        solution
    }

    fn newton(&self, target: f64) -> Solution {
        let mut x = 0.5;
        for i in 1..=self.max_iterations {
            let residual = Self::evaluate(x) - target;
            if residual == 0.0 {
                return Solution { x, iterations: i - 1, converged: true };
            }
            let next = x - residual / Self::derivative(x);
            if !next.is_finite() {
                // Flat derivative; keep the last usable iterate.
                return Solution { x, iterations: i, converged: false };
            }
            let step = (next - x).abs();
            x = next;
            if step < self.tolerance {
                return Solution { x, iterations: i, converged: true };
            }
        }
        Solution { x, iterations: self.max_iterations, converged: false }
    }
}
