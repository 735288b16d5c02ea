//! 1-D lookup-table sectional aero model: a single angle-of-attack grid shared by `cl`, `cd`
//! and `cm`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use vsm_math::interpolation::linear_interpolation;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolarVectors {
    alpha: Vec<f64>,
    cl: Vec<f64>,
    cd: Vec<f64>,
    cm: Vec<f64>,
}

impl PolarVectors {
    /// Builds a polar from four equal-length arrays. `alpha` must be strictly increasing once
    /// rows with a NaN in any of `cl`/`cd`/`cm` are removed.
    ///
    /// When `remove_nan` is set, rows where any of `cl[i]`, `cd[i]`, `cm[i]` is NaN are dropped
    /// from all four arrays consistently before the monotonicity check runs.
    pub fn new(alpha: Vec<f64>, cl: Vec<f64>, cd: Vec<f64>, cm: Vec<f64>, remove_nan: bool) -> Result<Self> {
        let n = alpha.len();
        if cl.len() != n || cd.len() != n || cm.len() != n {
            return Err(Error::Configuration(
                "PolarVectors: alpha, cl, cd, cm must have equal length".to_string(),
            ));
        }

        let (alpha, cl, cd, cm) = if remove_nan {
            let mut a = Vec::with_capacity(n);
            let mut l = Vec::with_capacity(n);
            let mut d = Vec::with_capacity(n);
            let mut m = Vec::with_capacity(n);
            for i in 0..n {
                if cl[i].is_nan() || cd[i].is_nan() || cm[i].is_nan() {
                    continue;
                }
                a.push(alpha[i]);
                l.push(cl[i]);
                d.push(cd[i]);
                m.push(cm[i]);
            }
            (a, l, d, m)
        } else {
            (alpha, cl, cd, cm)
        };

        if alpha.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::Configuration(
                "PolarVectors: alpha grid must be strictly increasing".to_string(),
            ));
        }

        Ok(Self { alpha, cl, cd, cm })
    }

    pub fn cl(&self, alpha: f64) -> f64 {
        linear_interpolation(alpha, &self.alpha, &self.cl)
    }

    pub fn cd(&self, alpha: f64) -> f64 {
        linear_interpolation(alpha, &self.alpha, &self.cd)
    }

    pub fn cm(&self, alpha: f64) -> f64 {
        linear_interpolation(alpha, &self.alpha, &self.cm)
    }

    pub fn alpha_grid(&self) -> &[f64] {
        &self.alpha
    }

    /// A polar on the same alpha grid with all coefficients zeroed, used to promote an
    /// `Inviscid` endpoint when interpolating against this polar.
    pub fn zeroed_like(other: &Self) -> Self {
        let n = other.alpha.len();
        Self {
            alpha: other.alpha.clone(),
            cl: vec![0.0; n],
            cd: vec![0.0; n],
            cm: vec![0.0; n],
        }
    }

    pub fn interpolate(a: &Self, b: &Self, t: f64) -> Result<Self> {
        if a.alpha != b.alpha {
            return Err(Error::Interpolation(
                "cannot interpolate PolarVectors with differing alpha grids".to_string(),
            ));
        }

        let lerp = |x: &[f64], y: &[f64]| -> Vec<f64> {
            x.iter().zip(y).map(|(x, y)| x + t * (y - x)).collect()
        };

        Ok(Self {
            alpha: a.alpha.clone(),
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
    fn removes_nan_rows_consistently() {
        let alpha = vec![-0.1, 0.0, 0.1, 0.2];
        let cl = vec![f64::NAN, 0.0, 0.5, 1.0];
        let cd = vec![0.01, 0.02, 0.03, 0.04];
        let cm = vec![0.0, 0.0, 0.0, 0.0];

        let polar = PolarVectors::new(alpha, cl, cd, cm, true).unwrap();
        assert_eq!(polar.alpha_grid(), &[0.0, 0.1, 0.2]);
    }

    #[test]
    fn flat_extrapolates_outside_grid() {
        let polar = PolarVectors::new(
            vec![0.0, 0.1],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            false,
        )
        .unwrap();

        assert_eq!(polar.cl(-5.0), 0.0);
        assert_eq!(polar.cl(5.0), 1.0);
    }

    #[test]
    fn rejects_non_monotone_grid() {
        let result = PolarVectors::new(
            vec![0.1, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            false,
        );
        assert!(result.is_err());
    }
}
