// run_config.rs
// Handles loading and parsing the run description from iontrim.toml: beam
// schedule, wire geometry, target materials and output switches. Falls back
// to a built-in boron/phosphorus implantation scenario when no file exists.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::material::{Element, Material};

pub const DEFAULT_CONFIG_FILE: &str = "iontrim.toml";

#[derive(Debug, Deserialize, Serialize)]
pub struct RunConfig {
    /// Output files are written as <basename>.xyz / .ldat / .json.
    #[serde(default = "default_basename")]
    pub basename: String,
    /// RNG seed; drawn from system entropy when omitted.
    pub seed: Option<u64>,
    /// Beam tilt from the wire axis in degrees (0 = parallel to the wire).
    #[serde(default)]
    pub angle_deg: f32,
    /// Statistics multiplier applied to every dose-derived ion count.
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
    #[serde(default = "default_true")]
    pub xyz_out: bool,
    #[serde(default = "default_true")]
    pub ldat_out: bool,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default = "default_beam")]
    pub beam: Vec<BeamStep>,
    #[serde(default = "default_materials")]
    pub material: Vec<MaterialConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeometryConfig {
    /// Wire cross-section width in nm (both in-plane axes).
    #[serde(default = "default_diameter_nm")]
    pub diameter_nm: f32,
    /// Wire length in Å.
    #[serde(default = "default_length")]
    pub length: f32,
    /// Bury the wire under the oxide overcoat instead of free-standing.
    #[serde(default)]
    pub buried: bool,
}

impl GeometryConfig {
    /// Shape extents in Å: [width, width, length].
    pub fn extents(&self) -> [f32; 3] {
        let d = 10.0 * self.diameter_nm;
        [d, d, self.length]
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            diameter_nm: default_diameter_nm(),
            length: default_length(),
            buried: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BeamStep {
    pub z: u32,
    pub m: f32,
    pub energy_ev: f32,
    /// Fluence in ions/cm².
    pub dose: f32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MaterialConfig {
    /// Mass density in g/cm³.
    pub rho: f32,
    pub element: Vec<ElementConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ElementConfig {
    pub z: u32,
    pub m: f32,
    pub t: f32,
}

impl MaterialConfig {
    pub fn build(&self) -> Result<Material> {
        let mut material = Material::new(self.rho);
        for el in &self.element {
            material.add_element(Element::new(el.z, el.m, el.t));
        }
        material.prepare()?;
        Ok(material)
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load iontrim.toml from the working directory, or fall back to the
    /// built-in default scenario.
    pub fn load_default() -> Self {
        match Self::load(DEFAULT_CONFIG_FILE) {
            Ok(config) => {
                println!("Loaded run configuration from {DEFAULT_CONFIG_FILE}");
                config
            }
            Err(e) => {
                eprintln!("No usable {DEFAULT_CONFIG_FILE} ({e}); using the built-in scenario");
                Self::default()
            }
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            basename: default_basename(),
            seed: None,
            angle_deg: 0.0,
            multiplier: default_multiplier(),
            xyz_out: true,
            ldat_out: true,
            geometry: GeometryConfig::default(),
            beam: default_beam(),
            material: default_materials(),
        }
    }
}

fn default_basename() -> String {
    "iontrim".to_string()
}

fn default_multiplier() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_diameter_nm() -> f32 {
    50.0
}

fn default_length() -> f32 {
    11000.0 // 1.1 µm
}

/// The historic boron/phosphorus implantation series.
fn default_beam() -> Vec<BeamStep> {
    vec![
        BeamStep { z: 5, m: 11.0, energy_ev: 320.0e3, dose: 3.0e13 },
        BeamStep { z: 5, m: 11.0, energy_ev: 220.0e3, dose: 2.2e13 },
        BeamStep { z: 5, m: 11.0, energy_ev: 160.0e3, dose: 1.5e13 },
        BeamStep { z: 5, m: 11.0, energy_ev: 120.0e3, dose: 1.2e13 },
        BeamStep { z: 15, m: 31.0, energy_ev: 250.0e3, dose: 2.5e13 },
    ]
}

/// Silicon wire plus SiO2 cover layer.
fn default_materials() -> Vec<MaterialConfig> {
    vec![
        MaterialConfig {
            rho: 2.329,
            element: vec![ElementConfig { z: 14, m: 28.0, t: 1.0 }],
        },
        MaterialConfig {
            rho: 2.634,
            element: vec![
                ElementConfig { z: 14, m: 28.0, t: 1.0 },
                ElementConfig { z: 8, m: 16.0, t: 2.0 },
            ],
        },
    ]
}
