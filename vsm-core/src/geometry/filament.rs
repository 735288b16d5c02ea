//! Biot-Savart induced-velocity kernels for the three filament kinds that make up a horseshoe
//! vortex panel, with Rankine (solid-core) regularization.

use serde::{Deserialize, Serialize};
use vsm_math::vec3::Vec3;

const EPS_ABS: f64 = 1.0e-20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// One leg of a horseshoe vortex.
pub enum Filament {
    /// The chordwise bound segment, from quarter-chord of one refined section to the next.
    BoundSegment { p1: Vec3, p2: Vec3 },
    /// A finite trailing segment, from a quarter-chord point to the trailing edge.
    TrailingSegment { p1: Vec3, p2: Vec3 },
    /// A semi-infinite trailing filament leaving the trailing edge tangent to the freestream.
    ///
    /// `reference_length` scales `core_radius_fraction` into an absolute core radius, since a
    /// semi-infinite filament has no natural length of its own; it is set at panel construction
    /// from the panel's chord. `sign` flips the circulation sense between a horseshoe's two legs.
    TrailingSemiInf { pivot: Vec3, direction: Vec3, sign: f64, reference_length: f64 },
}

impl Filament {
    /// Induced velocity at `point` for unit circulation, scaled by `gamma`, using a Rankine
    /// solid-core regularization with effective core radius `core_radius_fraction * reference
    /// length` (clamped to `EPS_ABS`). Writes no allocation; the caller accumulates into its own
    /// running sum.
    pub fn induced_velocity(&self, point: Vec3, gamma: f64, core_radius_fraction: f64) -> Vec3 {
        match *self {
            Self::BoundSegment { p1, p2 } | Self::TrailingSegment { p1, p2 } => {
                finite_segment_velocity(p1, p2, point, gamma, core_radius_fraction)
            }
            Self::TrailingSemiInf { pivot, direction, sign, reference_length } => {
                semi_infinite_velocity(pivot, direction, reference_length, point, gamma * sign, core_radius_fraction)
            }
        }
    }
}

/// Biot-Savart velocity induced by a finite straight segment from `p1` to `p2`, carrying
/// circulation `gamma`, evaluated at `point`.
fn finite_segment_velocity(p1: Vec3, p2: Vec3, point: Vec3, gamma: f64, core_radius_fraction: f64) -> Vec3 {
    let r0 = p2 - p1;
    let r1 = point - p1;
    let r2 = point - p2;

    let r1_len = r1.length();
    let r2_len = r2.length();
    let r0_len = r0.length();

    let rho = (core_radius_fraction * r0_len).max(EPS_ABS);

    if r1_len < rho || r2_len < rho {
        return Vec3::default();
    }

    let cross = r1.cross(r2);
    let cross_len_sq = cross.length_squared();

    if cross_len_sq < EPS_ABS * EPS_ABS {
        return Vec3::default();
    }

    let perpendicular_distance = cross_len_sq.sqrt() / r0_len;

    let core_scale = if perpendicular_distance < rho {
        (perpendicular_distance / rho).powi(2)
    } else {
        1.0
    };

    let k = r0.dot(r1 * (1.0 / r1_len) - r2 * (1.0 / r2_len));

    cross * (gamma * core_scale * k / (4.0 * std::f64::consts::PI * cross_len_sq))
}

/// Biot-Savart velocity induced by a semi-infinite filament leaving `pivot` along unit `direction`,
/// carrying circulation `gamma`, evaluated at `point`. `reference_length` scales
/// `core_radius_fraction` into an absolute core radius.
fn semi_infinite_velocity(
    pivot: Vec3,
    direction: Vec3,
    reference_length: f64,
    point: Vec3,
    gamma: f64,
    core_radius_fraction: f64,
) -> Vec3 {
    let r1 = point - pivot;
    let r1_len = r1.length();

    let rho = (core_radius_fraction * reference_length).max(EPS_ABS);

    if r1_len < rho {
        return Vec3::default();
    }

    let cross = direction.cross(r1);
    let cross_len_sq = cross.length_squared();

    if cross_len_sq < EPS_ABS * EPS_ABS {
        return Vec3::default();
    }

    let perpendicular_distance = cross_len_sq.sqrt();

    let core_scale = if perpendicular_distance < rho {
        (perpendicular_distance / rho).powi(2)
    } else {
        1.0
    };

    let cos_theta = direction.dot(r1) / r1_len;

    cross * (gamma * core_scale * (1.0 - cos_theta) / (4.0 * std::f64::consts::PI * cross_len_sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_segment_induces_zero_velocity_on_its_own_axis() {
        let p1 = Vec3::new(-0.5, 0.0, 0.0);
        let p2 = Vec3::new(0.5, 0.0, 0.0);
        let on_axis = Vec3::new(2.0, 0.0, 0.0);

        let v = finite_segment_velocity(p1, p2, on_axis, 1.0, 0.1);
        assert!(v.length() < 1e-9);
    }

    #[test]
    fn finite_segment_velocity_decreases_monotonically_with_core_radius() {
        let p1 = Vec3::new(0.0, -0.5, 0.0);
        let p2 = Vec3::new(0.0, 0.5, 0.0);
        let on_filament = Vec3::new(0.0, 0.0, 0.0);

        let mut last = f64::INFINITY;
        for &fraction in &[1e-6, 1e-3, 1e-1, 1.0, 10.0] {
            let v = finite_segment_velocity(p1, p2, on_filament, 1.0, fraction).length();
            assert!(v <= last + 1e-9);
            last = v;
        }
    }

    #[test]
    fn semi_infinite_is_finite_near_pivot() {
        let pivot = Vec3::new(0.0, 0.0, 0.0);
        let direction = Vec3::unit_x();

        let v = semi_infinite_velocity(pivot, direction, 1.0, pivot, 1.0, 0.1);
        assert!(v.is_finite());
    }
}
