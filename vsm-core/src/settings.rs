//! YAML settings file loading: the only place the crate depends on `serde_yml`. Builds `Wing`,
//! `BodyAerodynamics` and `SolverConfig` values from a parsed document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vsm_math::vec3::Vec3;

use crate::body::BodyAerodynamics;
use crate::error::Result;
use crate::geometry::{PanelDistribution, Wing};
use crate::section_models::{LeiBreukels, PolarMatrices, PolarVectors, SectionalAeroModel};
use crate::solver::{AerodynamicModelType, ArtificialDamping, InitialGammaDistribution, SolverConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub wings: Vec<WingSettings>,
    pub solver_settings: SolverSettingsFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WingSettings {
    pub n_panels: usize,
    #[serde(default = "default_distribution")]
    pub distribution: PanelDistribution,
    #[serde(default = "default_spanwise_direction")]
    pub spanwise_direction: [f64; 3],
    #[serde(default = "default_remove_nan")]
    pub remove_nan: bool,
    pub sections: Vec<SectionSettings>,
}

fn default_distribution() -> PanelDistribution {
    PanelDistribution::Linear
}

fn default_spanwise_direction() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_remove_nan() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSettings {
    pub le: [f64; 3],
    pub te: [f64; 3],
    pub aero: SectionAeroSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, tag = "type")]
pub enum SectionAeroSettings {
    Inviscid,
    PolarVectors { alpha: Vec<f64>, cl: Vec<f64>, cd: Vec<f64>, cm: Vec<f64> },
    PolarMatrices { alpha: Vec<f64>, delta: Vec<f64>, cl: Vec<f64>, cd: Vec<f64>, cm: Vec<f64> },
    LeiBreukels { tube_diameter: f64, camber_height: f64 },
}

impl SectionAeroSettings {
    fn build(&self, remove_nan: bool) -> Result<SectionalAeroModel> {
        Ok(match self {
            Self::Inviscid => SectionalAeroModel::Inviscid,
            Self::PolarVectors { alpha, cl, cd, cm } => SectionalAeroModel::PolarVectors(PolarVectors::new(
                alpha.clone(),
                cl.clone(),
                cd.clone(),
                cm.clone(),
                remove_nan,
            )?),
            Self::PolarMatrices { alpha, delta, cl, cd, cm } => SectionalAeroModel::PolarMatrices(PolarMatrices::new(
                alpha.clone(),
                delta.clone(),
                cl.clone(),
                cd.clone(),
                cm.clone(),
            )?),
            Self::LeiBreukels { tube_diameter, camber_height } => {
                SectionalAeroModel::LeiBreukels(LeiBreukels::new(*tube_diameter, *camber_height))
            }
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettingsFile {
    pub aerodynamic_model_type: AerodynamicModelType,
    pub density: f64,
    pub max_iterations: usize,
    pub rtol: f64,
    pub tol_reference_error: f64,
    pub relaxation_factor: f64,
    pub artificial_damping: bool,
    #[serde(default)]
    pub k2: f64,
    #[serde(default)]
    pub k4: f64,
    pub type_initial_gamma_distribution: InitialGammaDistribution,
    pub core_radius_fraction: f64,
    pub mu: f64,
    #[serde(default)]
    pub verbose: bool,
}

impl SolverSettingsFile {
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig {
            model: self.aerodynamic_model_type,
            core_radius_fraction: self.core_radius_fraction,
            max_iterations: self.max_iterations,
            rtol: self.rtol,
            relaxation_factor: self.relaxation_factor,
            tol_reference_error: self.tol_reference_error,
            artificial_damping: ArtificialDamping { on: self.artificial_damping, k2: self.k2, k4: self.k4 },
            initial_gamma: self.type_initial_gamma_distribution,
            density: self.density,
            mu: self.mu,
            verbose: self.verbose,
        }
    }
}

impl Settings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Builds the `Wing`s described by this settings document, each with its sections already
    /// added (but not yet refined; refinement happens inside `BodyAerodynamics::new`).
    pub fn build_wings(&self) -> Result<Vec<Wing>> {
        self.wings.iter().map(WingSettings::build).collect()
    }

    pub fn build_body(&self, origin: Vec3) -> Result<BodyAerodynamics> {
        BodyAerodynamics::new(self.build_wings()?, origin)
    }

    pub fn solver_config(&self) -> SolverConfig {
        self.solver_settings.to_solver_config()
    }
}

impl WingSettings {
    fn build(&self) -> Result<Wing> {
        let spanwise_direction = Vec3::from(self.spanwise_direction);
        let mut wing = Wing::new(self.n_panels, self.distribution, spanwise_direction, self.remove_nan)?;

        for section in &self.sections {
            let aero = section.aero.build(self.remove_nan)?;
            wing.add_section(Vec3::from(section.le), Vec3::from(section.te), aero)?;
        }

        Ok(wing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_YAML: &str = r#"
wings:
  - n_panels: 4
    distribution: Linear
    sections:
      - le: [0.0, -2.0, 0.0]
        te: [1.0, -2.0, 0.0]
        aero:
          type: Inviscid
      - le: [0.0, 2.0, 0.0]
        te: [1.0, 2.0, 0.0]
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

    #[test]
    fn parses_a_minimal_settings_document() {
        let settings = Settings::from_yaml_str(EXAMPLE_YAML).unwrap();
        assert_eq!(settings.wings.len(), 1);
        assert_eq!(settings.wings[0].n_panels, 4);
    }

    #[test]
    fn builds_a_solvable_body_from_settings() {
        let settings = Settings::from_yaml_str(EXAMPLE_YAML).unwrap();
        let body = settings.build_body(Vec3::default()).unwrap();
        assert_eq!(body.n_panels(), 4);
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = format!("{EXAMPLE_YAML}\nextra_unknown_field: true\n");
        assert!(Settings::from_yaml_str(&yaml).is_err());
    }
}
