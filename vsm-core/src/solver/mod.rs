//! Configuration, preallocated scratch state and result types for the circulation solver.

pub mod aic;
pub mod gamma_loop;
pub mod newton;

use serde::{Deserialize, Serialize};
use vsm_math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum AerodynamicModelType {
    Vsm,
    Llt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum InitialGammaDistribution {
    Elliptic,
    Zeros,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtificialDamping {
    pub on: bool,
    pub k2: f64,
    pub k4: f64,
}

impl Default for ArtificialDamping {
    fn default() -> Self {
        Self { on: false, k2: 0.0, k4: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    pub model: AerodynamicModelType,
    pub core_radius_fraction: f64,
    pub max_iterations: usize,
    pub rtol: f64,
    pub relaxation_factor: f64,
    pub tol_reference_error: f64,
    pub artificial_damping: ArtificialDamping,
    pub initial_gamma: InitialGammaDistribution,
    pub density: f64,
    pub mu: f64,
    /// Gates the per-iteration `debug!` logging in [`gamma_loop`](super::solver::gamma_loop); a
    /// solve that does not converge always emits a `warn!` regardless of this flag.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            model: AerodynamicModelType::Vsm,
            core_radius_fraction: 0.1,
            max_iterations: 1500,
            rtol: 1e-5,
            relaxation_factor: 0.05,
            tol_reference_error: 1e-6,
            artificial_damping: ArtificialDamping::default(),
            initial_gamma: InitialGammaDistribution::Elliptic,
            density: 1.225,
            mu: 1.81e-5,
            verbose: false,
        }
    }
}

/// Preallocated buffers sized to the panel count `p`, owned by a `BodyAerodynamics`'s solver and
/// reused across solves. Sizing (`resize`) is the only allocation point; `gamma_loop` and
/// `calculate_AIC_matrices` never allocate.
pub struct SolverState {
    pub aic_x: Matrix<f64>,
    pub aic_y: Matrix<f64>,
    pub aic_z: Matrix<f64>,
    pub gamma: Vec<f64>,
    pub gamma_new: Vec<f64>,
    pub alpha: Vec<f64>,
    pub induced_x: Vec<f64>,
    pub induced_y: Vec<f64>,
    pub induced_z: Vec<f64>,
    pub damping: Vec<f64>,
}

impl SolverState {
    pub fn new(p: usize) -> Self {
        Self {
            aic_x: Matrix::new_default([p, p]),
            aic_y: Matrix::new_default([p, p]),
            aic_z: Matrix::new_default([p, p]),
            gamma: vec![0.0; p],
            gamma_new: vec![0.0; p],
            alpha: vec![0.0; p],
            induced_x: vec![0.0; p],
            induced_y: vec![0.0; p],
            induced_z: vec![0.0; p],
            damping: vec![0.0; p],
        }
    }

    /// Resizes every buffer to `p` panels; called whenever the panel count changes (mesh
    /// refinement, wing add/remove). This is the only place the solver allocates outside of
    /// construction.
    pub fn resize(&mut self, p: usize) {
        *self = Self::new(p);
    }

    pub fn n_panels(&self) -> usize {
        self.gamma.len()
    }
}

#[derive(Debug, Clone, Copy)]
/// Non-fatal convergence failure, carried on the solve's success path per [`crate::error::Error`]'s
/// doc comment: this is never an `Err`.
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub last_residual: f64,
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
    pub cs: f64,
    pub f_global: vsm_math::vec3::Vec3,
    pub m_global: vsm_math::vec3::Vec3,
    pub gamma_distribution: Vec<f64>,
    pub cl_distribution: Vec<f64>,
    pub cd_distribution: Vec<f64>,
    pub cm_distribution: Vec<f64>,
    pub alpha_array: Vec<f64>,
    pub projected_area: f64,
    pub warning: Option<ConvergenceWarning>,
}
