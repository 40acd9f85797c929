// sample/layers.rs
// A stack of planar layers along x, each bound to one material in order.

use ultraviolet::Vec3;

use crate::error::{Error, Result};
use crate::material::Material;
use crate::sample::{Boundary, Sample};

pub struct SampleLayers {
    /// Layer thicknesses in Å, ordered from x = 0.
    pub thickness: Vec<f32>,
    pub bc: [Boundary; 3],
    pub materials: Vec<Material>,
}

impl SampleLayers {
    pub fn new(thickness: Vec<f32>) -> Result<Self> {
        if thickness.is_empty() || thickness.iter().any(|&t| t <= 0.0) {
            return Err(Error::InvalidParam(
                "layer thicknesses must be positive and non-empty".to_string(),
            ));
        }
        Ok(Self {
            thickness,
            bc: [Boundary::Infinite; 3],
            materials: Vec::new(),
        })
    }

    pub fn push_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn total_thickness(&self) -> f32 {
        self.thickness.iter().sum()
    }

    /// Index of the layer containing the position's x coordinate, clamped to
    /// the last layer beyond the stack. Whether "beyond" means cut or
    /// continue is left to the boundary-condition codes.
    pub fn lookup_layer(&self, pos: Vec3) -> usize {
        let mut depth = 0.0;
        for (i, t) in self.thickness.iter().enumerate() {
            depth += t;
            if pos.x < depth {
                return i;
            }
        }
        self.thickness.len() - 1
    }
}

impl Sample for SampleLayers {
    fn materials(&self) -> &[Material] {
        &self.materials
    }

    fn lookup_material(&self, pos: Vec3) -> Option<usize> {
        if self.bc[0] == Boundary::Cut && (pos.x < 0.0 || pos.x >= self.total_thickness()) {
            return None;
        }
        if self.materials.is_empty() {
            return None;
        }
        Some(self.lookup_layer(pos).min(self.materials.len() - 1))
    }

    // range_material keeps the trait's sentinel: boundary-crossing distances
    // along general directions are not tracked for this shape. The engine's
    // post-flight lookup still catches every layer change.

    fn check(&self) -> Result<()> {
        if self.materials.len() != self.thickness.len() {
            return Err(Error::InvalidParam(format!(
                "layer stack has {} thicknesses but {} materials",
                self.thickness.len(),
                self.materials.len()
            )));
        }
        Ok(())
    }
}
