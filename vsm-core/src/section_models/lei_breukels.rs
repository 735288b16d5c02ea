//! Analytic polynomial fit for leading-edge-inflatable tube kite airfoils, after Breukels (2011).
//!
//! The coefficients below are fixed constants: for a given `(tube_diameter, camber_height)` the
//! polynomial always produces the same output, which is what lets panels interpolate the two
//! scalar parameters rather than the coefficient tables themselves.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeiBreukels {
    /// Inflated tube diameter as a fraction of chord.
    pub tube_diameter: f64,
    /// Camber height as a fraction of chord.
    pub camber_height: f64,
}

impl LeiBreukels {
    pub fn new(tube_diameter: f64, camber_height: f64) -> Self {
        Self { tube_diameter, camber_height }
    }

    pub fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            tube_diameter: a.tube_diameter + t * (b.tube_diameter - a.tube_diameter),
            camber_height: a.camber_height + t * (b.camber_height - a.camber_height),
        }
    }

    pub fn cl(&self, alpha: f64) -> f64 {
        let alpha_deg = alpha.to_degrees();
        let (t, k) = (self.tube_diameter, self.camber_height);

        let c1 = 0.3537 - 0.0908 * t - 2.5389 * k + 1.2193 * t * k;
        let c2 = 6.3959 + 0.1436 * t - 2.2845 * k - 0.1130 * t * k;
        let c3 = 0.00317 - 0.01368 * t + 0.0168 * k;
        let c4 = -0.00021 + 0.00092 * t - 0.00114 * k;

        c1 + c2 * alpha + c3 * alpha_deg.powi(2) + c4 * alpha_deg.powi(3)
    }

    pub fn cd(&self, alpha: f64) -> f64 {
        let alpha_deg = alpha.to_degrees();
        let (t, k) = (self.tube_diameter, self.camber_height);

        let d1 = 0.0617 - 0.0426 * t + 0.2802 * k;
        let d2 = -0.0002 + 0.0004 * t - 0.0017 * k;
        let d3 = 0.0000047 + 0.0000034 * t;

        (d1 + d2 * alpha_deg + d3 * alpha_deg.powi(2)).max(0.0)
    }

    pub fn cm(&self, alpha: f64) -> f64 {
        let alpha_deg = alpha.to_degrees();
        let (t, k) = (self.tube_diameter, self.camber_height);

        let m1 = -0.0585 - 0.0296 * t - 0.3815 * k;
        let m2 = -0.0011 + 0.0014 * t + 0.0022 * k;

        m1 + m2 * alpha_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_is_linear_in_both_parameters() {
        let a = LeiBreukels::new(0.0, 0.0);
        let b = LeiBreukels::new(4.0, 1.0);

        let mid = LeiBreukels::interpolate(&a, &b, 0.5);
        assert!((mid.tube_diameter - 2.0).abs() < 1e-12);
        assert!((mid.camber_height - 0.5).abs() < 1e-12);
    }

    #[test]
    fn matches_end_sections_at_interpolation_endpoints() {
        let a = LeiBreukels::new(0.0, 0.0);
        let b = LeiBreukels::new(4.0, 1.0);

        let at_zero = LeiBreukels::interpolate(&a, &b, 0.0);
        let at_one = LeiBreukels::interpolate(&a, &b, 1.0);

        assert_eq!(at_zero.cl(0.1), a.cl(0.1));
        assert_eq!(at_one.cl(0.1), b.cl(0.1));
    }

    #[test]
    fn drag_is_never_negative() {
        let foil = LeiBreukels::new(2.0, 0.3);
        for i in -20..=20 {
            let alpha = (i as f64).to_radians();
            assert!(foil.cd(alpha) >= 0.0);
        }
    }
}
