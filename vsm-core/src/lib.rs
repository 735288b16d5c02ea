//! Lifting-Line Theory and Vortex Step Method wing-load solver.
//!
//! [`solve`] ties the three solve stages together: AIC assembly ([`solver::aic`]), the damped
//! circulation fixed-point loop ([`solver::gamma_loop`]), and force/moment integration
//! ([`results`]).

pub mod body;
pub mod error;
pub mod geometry;
pub mod results;
pub mod section_models;
pub mod settings;
pub mod solver;

pub use body::BodyAerodynamics;
pub use error::{Error, Result};
pub use geometry::{Filament, Panel, PanelDistribution, Section, Wing};
pub use section_models::{LeiBreukels, PolarMatrices, PolarVectors, SectionalAeroModel};
pub use settings::Settings;
pub use solver::{AerodynamicModelType, ConvergenceWarning, InitialGammaDistribution, SolveOutcome, SolverConfig, SolverState};

use vsm_math::vec3::Vec3;

/// Runs a full solve for `body` under `config`, about `reference_point`: assembles the AIC
/// matrices, runs the circulation fixed-point loop (falling back to Newton-Raphson on
/// divergence), then integrates the converged circulation into global coefficients.
///
/// `state` is reused across repeated solves against the same `body` (e.g. a polar sweep); callers
/// should call `state.resize(body.n_panels())` whenever the body's panel count changes.
pub fn solve(body: &BodyAerodynamics, state: &mut SolverState, config: &SolverConfig, reference_point: Vec3) -> Result<SolveOutcome> {
    solver::aic::calculate_aic_matrices(body, state, config.model, config.core_radius_fraction)?;
    let warning = solver::gamma_loop::gamma_loop(body, state, config)?;

    let mut outcome = results::calculate_results(body, state, config, reference_point);
    outcome.warning = warning;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use section_models::SectionalAeroModel;

    #[test]
    fn solve_converges_for_a_rectangular_wing_and_reports_no_warning() {
        let mut wing = Wing::new(10, PanelDistribution::Linear, Vec3::unit_y(), true).unwrap();
        wing.add_section(Vec3::new(0.0, -5.0, 0.0), Vec3::new(1.0, -5.0, 0.0), SectionalAeroModel::Inviscid).unwrap();
        wing.add_section(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 5.0, 0.0), SectionalAeroModel::Inviscid).unwrap();

        let mut body = BodyAerodynamics::new(vec![wing], Vec3::default()).unwrap();
        let alpha = 4.0_f64.to_radians();
        body.set_va(Vec3::new(20.0 * alpha.cos(), 0.0, 20.0 * alpha.sin()), Vec3::default());

        let config = SolverConfig::default();
        let mut state = SolverState::new(body.n_panels());

        let outcome = solve(&body, &mut state, &config, Vec3::default()).unwrap();

        assert!(outcome.warning.is_none());
        assert!(outcome.cl > 0.0);
    }

    #[test]
    fn solve_from_yaml_settings_round_trips_through_the_full_pipeline() {
        let yaml = r#"
wings:
  - n_panels: 6
    sections:
      - le: [0.0, -4.0, 0.0]
        te: [1.0, -4.0, 0.0]
        aero:
          type: Inviscid
      - le: [0.0, 4.0, 0.0]
        te: [1.0, 4.0, 0.0]
        aero:
          type: Inviscid
solver_settings:
  aerodynamic_model_type: Vsm
  density: 1.225
  max_iterations: 1500
  rtol: 1.0e-5
  tol_reference_error: 1.0e-6
  relaxation_factor: 0.05
  artificial_damping: false
  type_initial_gamma_distribution: Elliptic
  core_radius_fraction: 0.1
  mu: 1.81e-5
"#;
        let settings = Settings::from_yaml_str(yaml).unwrap();
        let mut body = settings.build_body(Vec3::default()).unwrap();
        body.set_va(Vec3::new(20.0, 0.0, 1.0), Vec3::default());

        let config = settings.solver_config();
        let mut state = SolverState::new(body.n_panels());

        let outcome = solve(&body, &mut state, &config, Vec3::default()).unwrap();
        assert!(outcome.cl.is_finite());
    }
}
