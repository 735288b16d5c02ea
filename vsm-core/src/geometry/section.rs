//! User-facing wing sections, before mesh refinement.

use serde::{Deserialize, Serialize};
use vsm_math::vec3::Vec3;

use crate::error::{Error, Result};
use crate::section_models::SectionalAeroModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single spanwise station: leading and trailing edge points plus the sectional aero model
/// in effect at that station.
pub struct Section {
    pub le: Vec3,
    pub te: Vec3,
    pub aero: SectionalAeroModel,
}

impl Section {
    pub fn new(le: Vec3, te: Vec3, aero: SectionalAeroModel) -> Result<Self> {
        if (te - le).length() <= 0.0 {
            return Err(Error::Geometry("section chord vector (te - le) must be nonzero".to_string()));
        }

        Ok(Self { le, te, aero })
    }

    pub fn quarter_chord(&self) -> Vec3 {
        self.le + 0.25 * (self.te - self.le)
    }

    pub fn chord_vector(&self) -> Vec3 {
        self.te - self.le
    }
}
