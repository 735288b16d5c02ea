//! Sectional aerodynamic models: pure functions mapping (angle of attack, flap deflection) to the
//! 2-D lift, drag and moment coefficients used to close the circulation equation.

pub mod polar_vectors;
pub mod polar_matrices;
pub mod lei_breukels;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use polar_vectors::PolarVectors;
pub use polar_matrices::PolarMatrices;
pub use lei_breukels::LeiBreukels;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Sectional aerodynamic model, closed over the four variants the engine supports.
pub enum SectionalAeroModel {
    /// `cl = 2*pi*sin(alpha)`, `cd = 0`, `cm = 0`.
    Inviscid,
    /// 1-D lookup table over angle of attack.
    PolarVectors(PolarVectors),
    /// 2-D lookup table over (angle of attack, flap deflection).
    PolarMatrices(PolarMatrices),
    /// Analytic Breukels leading-edge-inflatable airfoil polynomial fit.
    LeiBreukels(LeiBreukels),
}

impl Default for SectionalAeroModel {
    fn default() -> Self {
        Self::Inviscid
    }
}

impl SectionalAeroModel {
    pub fn cl(&self, alpha: f64, delta: f64) -> f64 {
        match self {
            Self::Inviscid => 2.0 * std::f64::consts::PI * alpha.sin(),
            Self::PolarVectors(polar) => polar.cl(alpha),
            Self::PolarMatrices(polar) => polar.cl(alpha, delta),
            Self::LeiBreukels(lei) => lei.cl(alpha),
        }
    }

    pub fn cd_cm(&self, alpha: f64, delta: f64) -> (f64, f64) {
        match self {
            Self::Inviscid => (0.0, 0.0),
            Self::PolarVectors(polar) => (polar.cd(alpha), polar.cm(alpha)),
            Self::PolarMatrices(polar) => (polar.cd(alpha, delta), polar.cm(alpha, delta)),
            Self::LeiBreukels(lei) => (lei.cd(alpha), lei.cm(alpha)),
        }
    }

    /// Linearly interpolates between two sectional models at a fraction `t` in `[0, 1]`, used by
    /// mesh refinement to build a sectional model for a panel between two user sections.
    ///
    /// Interpolating between an `Inviscid` endpoint and a polar endpoint promotes the inviscid
    /// side to a zeroed polar on the other side's grid; interpolating between two structurally
    /// incompatible polar grids is an [`Error::Interpolation`].
    pub fn interpolate(a: &Self, b: &Self, t: f64) -> Result<Self> {
        match (a, b) {
            (Self::Inviscid, Self::Inviscid) => Ok(Self::Inviscid),
            (Self::LeiBreukels(a), Self::LeiBreukels(b)) => Ok(Self::LeiBreukels(LeiBreukels::interpolate(a, b, t))),
            (Self::PolarVectors(a), Self::PolarVectors(b)) => Ok(Self::PolarVectors(PolarVectors::interpolate(a, b, t)?)),
            (Self::PolarMatrices(a), Self::PolarMatrices(b)) => Ok(Self::PolarMatrices(PolarMatrices::interpolate(a, b, t)?)),
            (Self::Inviscid, Self::PolarVectors(other)) => {
                Ok(Self::PolarVectors(PolarVectors::interpolate(&PolarVectors::zeroed_like(other), other, t)?))
            }
            (Self::PolarVectors(other), Self::Inviscid) => {
                Ok(Self::PolarVectors(PolarVectors::interpolate(other, &PolarVectors::zeroed_like(other), t)?))
            }
            (Self::Inviscid, Self::PolarMatrices(other)) => {
                Ok(Self::PolarMatrices(PolarMatrices::interpolate(&PolarMatrices::zeroed_like(other), other, t)?))
            }
            (Self::PolarMatrices(other), Self::Inviscid) => {
                Ok(Self::PolarMatrices(PolarMatrices::interpolate(other, &PolarMatrices::zeroed_like(other), t)?))
            }
            _ => Err(Error::Interpolation(
                "cannot interpolate between incompatible sectional aero models".to_string(),
            )),
        }
    }
}
