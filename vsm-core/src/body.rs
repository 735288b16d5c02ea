//! Collects panels across all wings of a model, tracks the apparent-velocity field and the
//! planform reference area used to nondimensionalize results.

use vsm_math::vec3::Vec3;

use crate::error::{Error, Result};
use crate::geometry::{Panel, Wing};

pub struct BodyAerodynamics {
    pub wings: Vec<Wing>,
    pub origin: Vec3,
    pub va_global: Vec3,
    pub omega: Vec3,
    pub projected_area: f64,
}

impl BodyAerodynamics {
    /// Builds a body from already-configured wings, refining each one with the initial
    /// freestream direction `va_global` (defaulting to +x if it is zero at construction time).
    pub fn new(mut wings: Vec<Wing>, origin: Vec3) -> Result<Self> {
        if wings.is_empty() {
            return Err(Error::Configuration("a body needs at least one wing".to_string()));
        }

        let initial_direction = Vec3::unit_x();
        for wing in &mut wings {
            wing.refine(initial_direction)?;
        }

        let mut body = Self {
            wings,
            origin,
            va_global: Vec3::default(),
            omega: Vec3::default(),
            projected_area: 0.0,
        };

        body.set_va(initial_direction, Vec3::default());
        Ok(body)
    }

    pub fn n_panels(&self) -> usize {
        self.wings.iter().map(|w| w.panels.len()).sum()
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.wings.iter().flat_map(|w| w.panels.iter())
    }

    fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.wings.iter_mut().flat_map(|w| w.panels.iter_mut())
    }

    /// Sets the global apparent velocity and angular rate, recomputing each panel's local `va`
    /// (`va_global + omega x (aero_center - origin)`) and realigning the semi-infinite wake
    /// filaments to the panel's own freestream direction.
    pub fn set_va(&mut self, va_global: Vec3, omega: Vec3) {
        self.va_global = va_global;
        self.omega = omega;

        let origin = self.origin;
        for panel in self.panels_mut() {
            let r = panel.aero_center - origin;
            panel.va = va_global + omega.cross(r);

            let direction = panel.va.normalize();
            let wake_direction = if direction.length() > 0.0 { direction } else { va_global.normalize() };
            panel.realign_wake_to(wake_direction);
        }

        self.projected_area = self.compute_projected_area();
    }

    /// Planform reference area of the wing: the sum of each panel's `width * chord`.
    fn compute_projected_area(&self) -> f64 {
        self.panels()
            .map(|panel| {
                let area_vector = panel.z_airf * (panel.width * panel.chord);
                area_vector.length()
            })
            .sum()
    }
}
