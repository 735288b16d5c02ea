//! 2-D lookup-table sectional aero model over (angle of attack, flap deflection).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use vsm_math::interpolation::{bilinear_interpolation, fill_nan_holes_idw};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolarMatrices {
    alpha: Vec<f64>,
    delta: Vec<f64>,
    cl: Vec<f64>,
    cd: Vec<f64>,
    cm: Vec<f64>,
}

impl PolarMatrices {
    /// Builds a polar from row-major `[alpha.len() * delta.len()]` grids. NaN entries in each
    /// grid are filled by an expanding Manhattan-radius inverse-distance weighted average of
    /// non-NaN neighbors before storage; a grid with no non-NaN entry at all is rejected.
    pub fn new(alpha: Vec<f64>, delta: Vec<f64>, mut cl: Vec<f64>, mut cd: Vec<f64>, mut cm: Vec<f64>) -> Result<Self> {
        let (nx, ny) = (alpha.len(), delta.len());
        let expected = nx * ny;
        if cl.len() != expected || cd.len() != expected || cm.len() != expected {
            return Err(Error::Configuration(
                "PolarMatrices: cl/cd/cm must have length len(alpha)*len(delta)".to_string(),
            ));
        }

        fill_nan_holes_idw(nx, ny, &mut cl)
            .ok_or_else(|| Error::Interpolation("PolarMatrices: cl grid is entirely NaN".to_string()))?;
        fill_nan_holes_idw(nx, ny, &mut cd)
            .ok_or_else(|| Error::Interpolation("PolarMatrices: cd grid is entirely NaN".to_string()))?;
        fill_nan_holes_idw(nx, ny, &mut cm)
            .ok_or_else(|| Error::Interpolation("PolarMatrices: cm grid is entirely NaN".to_string()))?;

        Ok(Self { alpha, delta, cl, cd, cm })
    }

    pub fn cl(&self, alpha: f64, delta: f64) -> f64 {
        bilinear_interpolation(alpha, delta, &self.alpha, &self.delta, &self.cl)
    }

    pub fn cd(&self, alpha: f64, delta: f64) -> f64 {
        bilinear_interpolation(alpha, delta, &self.alpha, &self.delta, &self.cd)
    }

    pub fn cm(&self, alpha: f64, delta: f64) -> f64 {
        bilinear_interpolation(alpha, delta, &self.alpha, &self.delta, &self.cm)
    }

    pub fn zeroed_like(other: &Self) -> Self {
        let n = other.cl.len();
        Self {
            alpha: other.alpha.clone(),
            delta: other.delta.clone(),
            cl: vec![0.0; n],
            cd: vec![0.0; n],
            cm: vec![0.0; n],
        }
    }

    pub fn interpolate(a: &Self, b: &Self, t: f64) -> Result<Self> {
        if a.alpha != b.alpha || a.delta != b.delta {
            return Err(Error::Interpolation(
                "cannot interpolate PolarMatrices with differing alpha/delta grids".to_string(),
            ));
        }

        let lerp = |x: &[f64], y: &[f64]| -> Vec<f64> {
            x.iter().zip(y).map(|(x, y)| x + t * (y - x)).collect()
        };

        Ok(Self {
            alpha: a.alpha.clone(),
            delta: a.delta.clone(),
            cl: lerp(&a.cl, &b.cl),
            cd: lerp(&a.cd, &b.cd),
            cm: lerp(&a.cm, &b.cm),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_nan_holes_before_storage() {
        let alpha = vec![0.0, 1.0, 2.0];
        let delta = vec![0.0, 1.0];
        let cl = vec![0.0, 1.0, f64::NAN, 3.0, 4.0, 5.0];
        let cd = vec![0.0; 6];
        let cm = vec![0.0; 6];

        let polar = PolarMatrices::new(alpha, delta, cl, cd, cm).unwrap();
        assert!(polar.cl(1.0, 0.0).is_finite());
    }

    #[test]
    fn rejects_entirely_nan_grid() {
        let alpha = vec![0.0, 1.0];
        let delta = vec![0.0, 1.0];
        let cl = vec![f64::NAN; 4];
        let cd = vec![0.0; 4];
        let cm = vec![0.0; 4];

        assert!(PolarMatrices::new(alpha, delta, cl, cd, cm).is_err());
    }
}
