//! Damped fixed-point iteration for the circulation distribution, with optional Jameson-style
//! artificial damping and a Newton-Raphson fallback on divergence.

use log::{debug, warn};
use vsm_math::smoothing::jameson_damping;
use vsm_math::statistics::max_abs;
use vsm_math::vec3::Vec3;

use crate::body::BodyAerodynamics;
use crate::error::{Error, Result};
use crate::solver::newton::newton_raphson_fallback;
use crate::solver::{ConvergenceWarning, InitialGammaDistribution, SolverConfig, SolverState};

/// Runs the damped fixed-point circulation solve to convergence (or `max_iterations`), writing
/// the converged circulation into `state.gamma`. Allocates nothing beyond the function's own
/// stack frame; all working arrays live in `state`.
pub fn gamma_loop(body: &BodyAerodynamics, state: &mut SolverState, config: &SolverConfig) -> Result<Option<ConvergenceWarning>> {
    let p = state.n_panels();
    let panels: Vec<_> = body.panels().collect();

    initialize_gamma(&mut state.gamma, &panels, config);

    let mut last_residual = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        evaluate_gamma_new(&panels, state)?;

        let omega_r = config.relaxation_factor;
        for i in 0..p {
            state.gamma[i] = (1.0 - omega_r) * state.gamma[i] + omega_r * state.gamma_new[i];
        }

        if config.artificial_damping.on {
            jameson_damping(&state.gamma, config.artificial_damping.k2, config.artificial_damping.k4, &mut state.damping);
            for i in 0..p {
                state.gamma[i] += state.damping[i];
            }
        }

        let gamma_diff = state
            .gamma_new
            .iter()
            .zip(state.gamma.iter())
            .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()));
        let gamma_scale = max_abs(&state.gamma).max(config.tol_reference_error);
        last_residual = gamma_diff / gamma_scale;

        if config.verbose {
            debug!("iteration {iteration}: residual = {last_residual:e}");
        }

        if !state.gamma.iter().all(|v| v.is_finite()) {
            return handle_divergence(body, state, config, iteration, last_residual);
        }

        if last_residual < config.rtol {
            return Ok(None);
        }
    }

    warn!(
        "circulation solve did not converge after {} iterations (residual {:e})",
        config.max_iterations, last_residual
    );

    Ok(Some(ConvergenceWarning { iterations: config.max_iterations, last_residual }))
}

/// Evaluates `gamma_new(gamma)` for the circulation currently in `state.gamma`: induced velocity
/// at each panel, reconstructed angle of attack, and the new circulation implied by the sectional
/// lift polar. Writes into `state.induced_*`, `state.alpha` and `state.gamma_new`; never
/// allocates.
pub(crate) fn evaluate_gamma_new(panels: &[&crate::geometry::Panel], state: &mut SolverState) -> Result<()> {
    let p = state.n_panels();

    state.aic_x.multiply_into(&state.gamma, &mut state.induced_x);
    state.aic_y.multiply_into(&state.gamma, &mut state.induced_y);
    state.aic_z.multiply_into(&state.gamma, &mut state.induced_z);

    for i in 0..p {
        let panel = panels[i];
        let u_i = Vec3::new(state.induced_x[i], state.induced_y[i], state.induced_z[i]);
        let v_eff = panel.va + u_i;

        if !v_eff.is_finite() {
            return Err(Error::NonFiniteState(format!("effective inflow at panel {i} is non-finite")));
        }

        let alpha = (v_eff.dot(panel.z_airf)).atan2(v_eff.dot(panel.x_airf));
        state.alpha[i] = alpha;

        let cl = panel.aero.cl(alpha, 0.0);

        let chord_normal_plane = v_eff.project_on_plane(panel.y_airf);
        let v_mag = chord_normal_plane.length();

        state.gamma_new[i] = 0.5 * v_mag * panel.chord * cl;
    }

    Ok(())
}

fn handle_divergence(
    body: &BodyAerodynamics,
    state: &mut SolverState,
    config: &SolverConfig,
    iteration: usize,
    last_residual: f64,
) -> Result<Option<ConvergenceWarning>> {
    warn!("circulation diverged at iteration {iteration}, falling back to Newton-Raphson");

    newton_raphson_fallback(body, state, config)?;

    if state.gamma.iter().all(|v| v.is_finite()) {
        Ok(None)
    } else {
        Err(Error::NonFiniteState(format!(
            "circulation remained non-finite after Newton-Raphson fallback (last residual {last_residual:e})"
        )))
    }
}

fn initialize_gamma(gamma: &mut [f64], panels: &[&crate::geometry::Panel], config: &SolverConfig) {
    match config.initial_gamma {
        InitialGammaDistribution::Zeros => gamma.fill(0.0),
        InitialGammaDistribution::Elliptic => {
            let p = gamma.len();
            if p == 0 {
                return;
            }

            let y_positions: Vec<f64> = panels.iter().map(|panel| panel.aero_center.y).collect();
            let half_span = y_positions.iter().fold(0.0_f64, |acc, &y| acc.max(y.abs())).max(1e-9);

            let u_ref = panels.iter().map(|panel| panel.va.length()).fold(0.0_f64, f64::max).max(1e-9);
            let chord_ref = panels.iter().map(|panel| panel.chord).sum::<f64>() / p as f64;

            let gamma_zero = 0.25 * u_ref * chord_ref;

            for (i, &y) in y_positions.iter().enumerate() {
                let ratio = (2.0 * y / (2.0 * half_span)).clamp(-1.0, 1.0);
                gamma[i] = gamma_zero * (1.0 - ratio * ratio).max(0.0).sqrt();
            }
        }
    }
}
