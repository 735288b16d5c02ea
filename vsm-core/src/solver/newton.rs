//! Nonlinear fallback for the circulation solve: Newton-Raphson on the residual
//! `F(gamma) = gamma - gamma_new(gamma)`, with a finite-differenced dense Jacobian solved by the
//! same Gaussian-elimination primitive the math crate uses for its other dense linear solves.

use vsm_math::matrix::Matrix;

use crate::body::BodyAerodynamics;
use crate::error::{Error, Result};
use crate::geometry::Panel;
use crate::solver::gamma_loop::evaluate_gamma_new;
use crate::solver::{SolverConfig, SolverState};

const FINITE_DIFFERENCE_STEP: f64 = 1e-6;
const NEWTON_MAX_ITERATIONS: usize = 50;
const NEWTON_TOLERANCE: f64 = 1e-8;

/// Runs Newton-Raphson on `F(gamma) = gamma - gamma_new(gamma)` starting from `state.gamma`,
/// overwriting it with the converged (or last attempted) solution. This is the slow path: it
/// allocates the dense Jacobian and residual vectors, unlike the hot fixed-point loop.
pub fn newton_raphson_fallback(body: &BodyAerodynamics, state: &mut SolverState, config: &SolverConfig) -> Result<()> {
    let panels: Vec<&Panel> = body.panels().collect();
    let p = state.n_panels();

    let mut gamma = vec![0.0; p];
    gamma.copy_from_slice(&state.gamma);
    for g in gamma.iter_mut() {
        if !g.is_finite() {
            *g = 0.0;
        }
    }

    for _ in 0..NEWTON_MAX_ITERATIONS {
        let residual = residual_at(&panels, state, &gamma, config)?;
        let residual_norm = residual.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()));

        if residual_norm < NEWTON_TOLERANCE {
            break;
        }

        let jacobian = finite_difference_jacobian(&panels, state, &gamma, config)?;

        let neg_residual: Vec<f64> = residual.iter().map(|r| -r).collect();
        let step = jacobian
            .solve_gaussian_elimination(&neg_residual)
            .ok_or_else(|| Error::NonFiniteState("Newton-Raphson Jacobian is singular".to_string()))?;

        for i in 0..p {
            gamma[i] += step[i];
        }
    }

    state.gamma.copy_from_slice(&gamma);
    Ok(())
}

fn residual_at(panels: &[&Panel], state: &mut SolverState, gamma: &[f64], _config: &SolverConfig) -> Result<Vec<f64>> {
    state.gamma.copy_from_slice(gamma);
    evaluate_gamma_new(panels, state)?;

    Ok(gamma.iter().zip(state.gamma_new.iter()).map(|(g, g_new)| g - g_new).collect())
}

fn finite_difference_jacobian(panels: &[&Panel], state: &mut SolverState, gamma: &[f64], config: &SolverConfig) -> Result<Matrix<f64>> {
    let p = gamma.len();
    let base_residual = residual_at(panels, state, gamma, config)?;

    let mut jacobian = Matrix::new_default([p, p]);

    for j in 0..p {
        let mut perturbed = gamma.to_vec();
        let step = FINITE_DIFFERENCE_STEP.max(FINITE_DIFFERENCE_STEP * gamma[j].abs());
        perturbed[j] += step;

        let perturbed_residual = residual_at(panels, state, &perturbed, config)?;

        for i in 0..p {
            jacobian[[i, j]] = (perturbed_residual[i] - base_residual[i]) / step;
        }
    }

    Ok(jacobian)
}
