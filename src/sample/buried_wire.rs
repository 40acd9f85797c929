// sample/buried_wire.rs
// A wire buried under a uniform oxide overcoat. Material 0 is the wire,
// material 1 the cover layer; everything below the cover cutoff or beyond
// the wire length is substrate and treated as out of bounds.

use ultraviolet::Vec3;

use crate::config;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::sample::{Sample, SampleWire};

pub struct SampleBurriedWire {
    wire: SampleWire,
}

impl SampleBurriedWire {
    pub fn new(wx: f32, wy: f32, length: f32) -> Result<Self> {
        // all axes unbounded on the inner wire; this shape does its own
        // depth checks before delegating
        Ok(Self {
            wire: SampleWire::new(wx, wy, length)?,
        })
    }

    pub fn push_material(&mut self, material: Material) {
        self.wire.push_material(material);
    }

    pub fn w(&self) -> [f32; 3] {
        self.wire.w
    }
}

impl Sample for SampleBurriedWire {
    fn materials(&self) -> &[Material] {
        &self.wire.materials
    }

    fn lookup_material(&self, pos: Vec3) -> Option<usize> {
        // cover layer band, regardless of in-plane position
        if pos.z < 0.0 && pos.z >= -config::COVER_LAYER_DEPTH {
            return Some(1);
        }
        // above the sample or inside the substrate
        if pos.z > self.wire.w[2] || pos.z < -config::COVER_LAYER_DEPTH {
            return None;
        }
        // wire layer; the oxide fills the corners the wire test carves out
        match self.wire.lookup_material(pos) {
            Some(index) => Some(index),
            None => Some(1),
        }
    }

    fn check(&self) -> Result<()> {
        if self.wire.materials.len() < 2 {
            return Err(Error::InvalidParam(
                "buried wire needs a wire material and a cover material".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;

    fn buried() -> SampleBurriedWire {
        let mut s = SampleBurriedWire::new(100.0, 100.0, 1000.0).unwrap();
        s.push_material(material::silicon().unwrap());
        s.push_material(material::silicon_dioxide().unwrap());
        s
    }

    #[test]
    fn cover_band_wins_regardless_of_in_plane_position() {
        let s = buried();
        for (x, y) in [(50.0, 50.0), (-4000.0, 2.0e4), (150.0, -3.0)] {
            assert_eq!(s.lookup_material(Vec3::new(x, y, -1.0)), Some(1));
            assert_eq!(s.lookup_material(Vec3::new(x, y, -249.0)), Some(1));
            assert_eq!(s.lookup_material(Vec3::new(x, y, -250.0)), Some(1));
        }
    }

    #[test]
    fn wire_plane_at_depth_zero() {
        let s = buried();
        // inside the wire cross-section: wire material
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 0.0)), Some(0));
        // outside it: oxide corner fill
        assert_eq!(s.lookup_material(Vec3::new(-10.0, 50.0, 0.0)), Some(1));
    }

    #[test]
    fn substrate_and_far_above_are_vacuum() {
        let s = buried();
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, -250.1)), None);
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 1000.1)), None);
    }

    #[test]
    fn check_requires_cover_material() {
        let mut s = SampleBurriedWire::new(100.0, 100.0, 1000.0).unwrap();
        s.push_material(material::silicon().unwrap());
        assert!(s.check().is_err());
        s.push_material(material::silicon_dioxide().unwrap());
        assert!(s.check().is_ok());
    }
}
