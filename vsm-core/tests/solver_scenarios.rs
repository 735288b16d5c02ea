//! End-to-end scenarios spanning wing construction, AIC assembly and the circulation solve.

use vsm_core::geometry::{PanelDistribution, Wing};
use vsm_core::section_models::{PolarVectors, SectionalAeroModel};
use vsm_core::solver::{AerodynamicModelType, SolverConfig, SolverState};
use vsm_core::{solve, BodyAerodynamics};
use vsm_math::vec3::Vec3;

fn rectangular_wing(n_panels: usize, span: f64, chord: f64, aero: SectionalAeroModel) -> Wing {
    let mut wing = Wing::new(n_panels, PanelDistribution::Linear, Vec3::unit_y(), true).unwrap();
    wing.add_section(Vec3::new(0.0, -span / 2.0, 0.0), Vec3::new(chord, -span / 2.0, 0.0), aero.clone()).unwrap();
    wing.add_section(Vec3::new(0.0, span / 2.0, 0.0), Vec3::new(chord, span / 2.0, 0.0), aero).unwrap();
    wing
}

fn body_at_angle_of_attack(wing: Wing, alpha_deg: f64, speed: f64) -> BodyAerodynamics {
    let mut body = BodyAerodynamics::new(vec![wing], Vec3::default()).unwrap();
    let alpha = alpha_deg.to_radians();
    body.set_va(Vec3::new(speed * alpha.cos(), 0.0, speed * alpha.sin()), Vec3::default());
    body
}

#[test]
fn vsm_and_llt_agree_within_a_few_percent_on_a_rectangular_wing() {
    let alpha_deg = 6.0;
    let speed = 20.0;

    let wing_vsm = rectangular_wing(20, 20.0, 1.0, SectionalAeroModel::Inviscid);
    let body_vsm = body_at_angle_of_attack(wing_vsm, alpha_deg, speed);
    assert!((body_vsm.projected_area - 20.0).abs() < 1e-6);

    let mut state_vsm = SolverState::new(body_vsm.n_panels());
    let config_vsm = SolverConfig { model: AerodynamicModelType::Vsm, ..SolverConfig::default() };
    let outcome_vsm = solve(&body_vsm, &mut state_vsm, &config_vsm, Vec3::default()).unwrap();
    assert!(outcome_vsm.warning.is_none());

    let wing_llt = rectangular_wing(20, 20.0, 1.0, SectionalAeroModel::Inviscid);
    let body_llt = body_at_angle_of_attack(wing_llt, alpha_deg, speed);

    let mut state_llt = SolverState::new(body_llt.n_panels());
    let config_llt = SolverConfig { model: AerodynamicModelType::Llt, ..SolverConfig::default() };
    let outcome_llt = solve(&body_llt, &mut state_llt, &config_llt, Vec3::default()).unwrap();
    assert!(outcome_llt.warning.is_none());

    let relative_difference = (outcome_vsm.cl - outcome_llt.cl).abs() / outcome_vsm.cl.abs();
    assert!(
        relative_difference < 0.03,
        "cl_vsm={} cl_llt={} relative_difference={}",
        outcome_vsm.cl,
        outcome_llt.cl,
        relative_difference
    );
}

#[test]
fn vector_polar_matching_inviscid_slope_reproduces_the_inviscid_cl() {
    let alpha_deg = 4.0;
    let speed = 20.0;

    let alpha_table: Vec<f64> = (-10..=10).map(|d| (d as f64).to_radians()).collect();
    let cl_table: Vec<f64> = alpha_table.iter().map(|a| 2.0 * std::f64::consts::PI * a).collect();
    let zeros = vec![0.0; alpha_table.len()];
    let polar = PolarVectors::new(alpha_table, cl_table, zeros.clone(), zeros, true).unwrap();

    let wing_polar = rectangular_wing(20, 20.0, 1.0, SectionalAeroModel::PolarVectors(polar));
    let body_polar = body_at_angle_of_attack(wing_polar, alpha_deg, speed);
    let mut state_polar = SolverState::new(body_polar.n_panels());
    let config = SolverConfig::default();
    let outcome_polar = solve(&body_polar, &mut state_polar, &config, Vec3::default()).unwrap();

    let wing_inviscid = rectangular_wing(20, 20.0, 1.0, SectionalAeroModel::Inviscid);
    let body_inviscid = body_at_angle_of_attack(wing_inviscid, alpha_deg, speed);
    let mut state_inviscid = SolverState::new(body_inviscid.n_panels());
    let outcome_inviscid = solve(&body_inviscid, &mut state_inviscid, &config, Vec3::default()).unwrap();

    let relative_difference = (outcome_polar.cl - outcome_inviscid.cl).abs() / outcome_inviscid.cl.abs();
    assert!(relative_difference < 0.02, "cl_polar={} cl_inviscid={}", outcome_polar.cl, outcome_inviscid.cl);
}

#[test]
fn freestream_rotation_preserves_lift_magnitude_within_tolerance() {
    let wing_symmetric = rectangular_wing(16, 20.0, 1.0, SectionalAeroModel::Inviscid);
    let body_symmetric = body_at_angle_of_attack(wing_symmetric, 5.0, 20.0);
    let mut state_symmetric = SolverState::new(body_symmetric.n_panels());
    let config = SolverConfig::default();
    let outcome_symmetric = solve(&body_symmetric, &mut state_symmetric, &config, Vec3::default()).unwrap();

    let wing_rotating = rectangular_wing(16, 20.0, 1.0, SectionalAeroModel::Inviscid);
    let mut body_rotating = BodyAerodynamics::new(vec![wing_rotating], Vec3::default()).unwrap();
    let alpha = 5.0_f64.to_radians();
    body_rotating.set_va(Vec3::new(20.0 * alpha.cos(), 0.0, 20.0 * alpha.sin()), Vec3::new(0.0, 0.0, 0.1));

    let mut state_rotating = SolverState::new(body_rotating.n_panels());
    let outcome_rotating = solve(&body_rotating, &mut state_rotating, &config, Vec3::default()).unwrap();

    assert!(!outcome_rotating
        .gamma_distribution
        .iter()
        .rev()
        .zip(outcome_rotating.gamma_distribution.iter())
        .all(|(a, b)| (a - b).abs() < 1e-8));

    let lift_magnitude_symmetric = outcome_symmetric.f_global.length();
    let lift_magnitude_rotating = outcome_rotating.f_global.length();
    let relative_difference = (lift_magnitude_symmetric - lift_magnitude_rotating).abs() / lift_magnitude_symmetric;

    assert!(
        relative_difference < 0.05,
        "symmetric={} rotating={}",
        lift_magnitude_symmetric,
        lift_magnitude_rotating
    );
}
