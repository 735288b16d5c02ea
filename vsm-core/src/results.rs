//! Integrates converged circulation into global forces, moments and coefficients, plus the
//! spanwise distributions used for post-processing.

use vsm_math::vec3::Vec3;

use crate::body::BodyAerodynamics;
use crate::solver::{SolveOutcome, SolverConfig, SolverState};

/// Integrates `state`'s converged solution into a [`SolveOutcome`]. Per panel: circulatory lift
/// `rho * |V_eff| * gamma` acting perpendicular to `V_eff`, plus a viscous contribution
/// `1/2 rho U^2 c c_d` along `V_eff` and a moment `1/2 rho U^2 c^2 c_m` about `y_airf`. Forces and
/// moments are summed weighted by panel `width` about `reference_point`, then nondimensionalized
/// by `1/2 rho U^2 S_proj`.
///
/// Allocates one `Vec` per returned distribution field (O(panels) total); never allocates
/// per-panel-per-iteration, unlike the hot solver loop.
pub fn calculate_results(
    body: &BodyAerodynamics,
    state: &SolverState,
    config: &SolverConfig,
    reference_point: Vec3,
) -> SolveOutcome {
    let panels: Vec<_> = body.panels().collect();
    let p = panels.len();

    let mut f_global = Vec3::default();
    let mut m_global = Vec3::default();

    let mut cl_distribution = Vec::with_capacity(p);
    let mut cd_distribution = Vec::with_capacity(p);
    let mut cm_distribution = Vec::with_capacity(p);

    let freestream_direction = body.va_global.normalize();
    let u_ref = body.va_global.length().max(1e-9);
    let dynamic_pressure = 0.5 * config.density * u_ref * u_ref;

    for i in 0..p {
        let panel = panels[i];
        let gamma = state.gamma[i];
        let alpha = state.alpha[i];

        let u_i = Vec3::new(state.induced_x[i], state.induced_y[i], state.induced_z[i]);
        let v_eff = panel.va + u_i;
        let v_eff_mag = v_eff.length();

        let (cd_sectional, cm_sectional) = panel.aero.cd_cm(alpha, 0.0);
        let cl_sectional = panel.aero.cl(alpha, 0.0);

        let lift_direction = if v_eff_mag > 0.0 {
            panel.z_airf.project_on_plane(v_eff.normalize()).normalize()
        } else {
            panel.z_airf
        };

        let lift_force = lift_direction * (config.density * v_eff_mag * gamma);
        let drag_force = v_eff.normalize() * (dynamic_pressure * panel.chord * cd_sectional);
        let moment = panel.y_airf * (dynamic_pressure * panel.chord * panel.chord * cm_sectional);

        let sectional_force = lift_force + drag_force;

        f_global += sectional_force * panel.width;

        let arm = panel.aero_center - reference_point;
        m_global += (arm.cross(sectional_force) + moment) * panel.width;

        cl_distribution.push(cl_sectional);
        cd_distribution.push(cd_sectional);
        cm_distribution.push(cm_sectional);
    }

    let s_proj = body.projected_area.max(1e-9);
    let nondim = dynamic_pressure * s_proj;

    let lift_axis = Vec3::unit_z();
    let drag_axis = if freestream_direction.length() > 0.0 { freestream_direction } else { Vec3::unit_x() };
    let side_axis = drag_axis.cross(lift_axis).normalize();

    let cl = f_global.dot(lift_axis) / nondim;
    let cd = f_global.dot(drag_axis) / nondim;
    let cs = f_global.dot(side_axis) / nondim;
    let cm = m_global.length() / (nondim * panels.iter().map(|p| p.chord).sum::<f64>().max(1e-9) / p.max(1) as f64);

    SolveOutcome {
        cl,
        cd,
        cm,
        cs,
        f_global,
        m_global,
        gamma_distribution: state.gamma.clone(),
        cl_distribution,
        cd_distribution,
        cm_distribution,
        alpha_array: state.alpha.clone(),
        projected_area: body.projected_area,
        warning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PanelDistribution, Wing};
    use crate::section_models::SectionalAeroModel;
    use crate::solver::aic::calculate_aic_matrices;
    use crate::solver::gamma_loop::gamma_loop;
    use crate::solver::AerodynamicModelType;

    #[test]
    fn rectangular_wing_at_small_alpha_approaches_thin_airfoil_lift() {
        let mut wing = Wing::new(20, PanelDistribution::Linear, Vec3::unit_y(), true).unwrap();
        wing.add_section(Vec3::new(0.0, -10.0, 0.0), Vec3::new(1.0, -10.0, 0.0), SectionalAeroModel::Inviscid).unwrap();
        wing.add_section(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 10.0, 0.0), SectionalAeroModel::Inviscid).unwrap();

        let mut body = BodyAerodynamics::new(vec![wing], Vec3::default()).unwrap();
        let alpha = 2.0_f64.to_radians();
        body.set_va(Vec3::new(20.0 * alpha.cos(), 0.0, 20.0 * alpha.sin()), Vec3::default());

        let config = SolverConfig { max_iterations: 1500, rtol: 1e-5, ..SolverConfig::default() };
        let mut state = SolverState::new(body.n_panels());
        calculate_aic_matrices(&body, &mut state, AerodynamicModelType::Vsm, config.core_radius_fraction).unwrap();
        gamma_loop(&body, &mut state, &config).unwrap();

        let outcome = calculate_results(&body, &state, &config, Vec3::default());

        let aspect_ratio = 20.0 / 1.0;
        let expected_cl = 2.0 * std::f64::consts::PI * alpha * aspect_ratio / (aspect_ratio + 2.0);

        assert!((outcome.cl - expected_cl).abs() / expected_cl.abs() < 0.05);
    }

    #[test]
    fn projected_area_is_positive_for_head_on_flow() {
        let mut wing = Wing::new(4, PanelDistribution::Linear, Vec3::unit_y(), true).unwrap();
        wing.add_section(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), SectionalAeroModel::Inviscid).unwrap();
        wing.add_section(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0), SectionalAeroModel::Inviscid).unwrap();

        let mut body = BodyAerodynamics::new(vec![wing], Vec3::default()).unwrap();
        body.set_va(Vec3::new(20.0, 0.0, 0.0), Vec3::default());

        let config = SolverConfig::default();
        let mut state = SolverState::new(body.n_panels());
        calculate_aic_matrices(&body, &mut state, AerodynamicModelType::Vsm, config.core_radius_fraction).unwrap();
        gamma_loop(&body, &mut state, &config).unwrap();

        let outcome = calculate_results(&body, &state, &config, Vec3::default());
        assert!(outcome.projected_area > 0.0);
    }
}
