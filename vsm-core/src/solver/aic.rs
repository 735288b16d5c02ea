//! Assembly of the three per-component aerodynamic influence coefficient matrices.

use crate::body::BodyAerodynamics;
use crate::error::{Error, Result};
use crate::geometry::Panel;
use crate::solver::{AerodynamicModelType, SolverState};
use vsm_math::vec3::Vec3;

/// Builds `state.aic_{x,y,z}` from `body`'s current panels. Entry `[i, j]` is the induced
/// velocity at panel `i`'s evaluation point due to unit circulation on panel `j`'s filament
/// system.
///
/// The evaluation point is the control point (three-quarter-chord) for VSM, or the aerodynamic
/// center (quarter-chord) for LLT. In LLT mode the diagonal entry excludes panel `i`'s own bound
/// segment: that point sits exactly on the bound segment's line, so its raw Biot-Savart
/// contribution is singular and is replaced by the sectional lift polar's own treatment of
/// self-induction rather than being added into the AIC matrix.
///
/// Row-major traversal; with the `parallel` feature, rows are computed by a `rayon` parallel
/// iterator writing each into its own row, which preserves the same accumulation order regardless
/// of thread scheduling.
pub fn calculate_aic_matrices(
    body: &BodyAerodynamics,
    state: &mut SolverState,
    model: AerodynamicModelType,
    core_radius_fraction: f64,
) -> Result<()> {
    let panels: Vec<&Panel> = body.panels().collect();
    let p = panels.len();

    if state.n_panels() != p {
        return Err(Error::Configuration(
            "solver state size does not match the current panel count".to_string(),
        ));
    }

    let eval_points: Vec<Vec3> = panels
        .iter()
        .map(|panel| match model {
            AerodynamicModelType::Vsm => panel.control_point,
            AerodynamicModelType::Llt => panel.aero_center,
        })
        .collect();

    assemble_rows(&panels, &eval_points, model, core_radius_fraction, state);

    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn assemble_rows(
    panels: &[&Panel],
    eval_points: &[Vec3],
    model: AerodynamicModelType,
    core_radius_fraction: f64,
    state: &mut SolverState,
) {
    let p = panels.len();
    for i in 0..p {
        let row_x = state.aic_x.row_mut(i);
        let row_y = state.aic_y.row_mut(i);
        let row_z = state.aic_z.row_mut(i);
        fill_row(panels, eval_points[i], i, model, core_radius_fraction, row_x, row_y, row_z);
    }
}

#[cfg(feature = "parallel")]
fn assemble_rows(
    panels: &[&Panel],
    eval_points: &[Vec3],
    model: AerodynamicModelType,
    core_radius_fraction: f64,
    state: &mut SolverState,
) {
    use rayon::prelude::*;

    let p = panels.len();
    let cols = p;

    state
        .aic_x
        .data
        .par_chunks_mut(cols)
        .zip(state.aic_y.data.par_chunks_mut(cols))
        .zip(state.aic_z.data.par_chunks_mut(cols))
        .enumerate()
        .for_each(|(i, ((row_x, row_y), row_z))| {
            fill_row(panels, eval_points[i], i, model, core_radius_fraction, row_x, row_y, row_z);
        });
}

#[inline]
fn fill_row(
    panels: &[&Panel],
    eval_point: Vec3,
    i: usize,
    model: AerodynamicModelType,
    core_radius_fraction: f64,
    row_x: &mut [f64],
    row_y: &mut [f64],
    row_z: &mut [f64],
) {
    for (j, panel_j) in panels.iter().enumerate() {
        let induced = if model == AerodynamicModelType::Llt && i == j {
            panel_j.induced_velocity_excluding_bound(eval_point, 1.0, core_radius_fraction)
        } else {
            panel_j.induced_velocity(eval_point, 1.0, core_radius_fraction)
        };

        row_x[j] = induced.x;
        row_y[j] = induced.y;
        row_z[j] = induced.z;
    }
}
