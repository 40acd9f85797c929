// sample/wire.rs
// A free-standing wire: rectangular cross-section in x/y, extruded along z.

use ultraviolet::Vec3;

use crate::config;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::sample::{Boundary, Sample};

pub struct SampleWire {
    /// Extent per axis: cross-section widths and extrusion length, in Å.
    pub w: [f32; 3],
    /// Per-axis boundary conditions. Only the extrusion axis is consulted by
    /// the lookup; the cross-section always bounds the material.
    pub bc: [Boundary; 3],
    pub materials: Vec<Material>,
}

impl SampleWire {
    pub fn new(wx: f32, wy: f32, length: f32) -> Result<Self> {
        if wx <= 0.0 || wy <= 0.0 || length <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "wire dimensions must be positive, got {wx} x {wy} x {length}"
            )));
        }
        Ok(Self {
            w: [wx, wy, length],
            bc: [Boundary::Infinite; 3],
            materials: Vec::new(),
        })
    }

    pub fn push_material(&mut self, material: Material) {
        self.materials.push(material);
    }
}

impl Sample for SampleWire {
    fn materials(&self) -> &[Material] {
        &self.materials
    }

    fn lookup_material(&self, pos: Vec3) -> Option<usize> {
        // cross-section containment
        if pos.x < 0.0 || pos.x > self.w[0] || pos.y < 0.0 || pos.y > self.w[1] {
            return None;
        }
        // extrusion axis: a CUT face swallows anything at or beyond it
        if self.bc[2] == Boundary::Cut && (pos.z < 0.0 || pos.z >= self.w[2]) {
            return None;
        }
        if self.materials.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn range_material(&self, pos: Vec3, dir: Vec3) -> f32 {
        // distance until the flight leaves the wire's bounding box
        let p = [pos.x, pos.y, pos.z];
        let d = [dir.x, dir.y, dir.z];
        let mut range = config::RANGE_SENTINEL;
        for axis in 0..3 {
            if axis == 2 && self.bc[2] == Boundary::Infinite {
                continue;
            }
            if d[axis] > 1.0e-9 {
                range = range.min((self.w[axis] - p[axis]) / d[axis]);
            } else if d[axis] < -1.0e-9 {
                range = range.min(-p[axis] / d[axis]);
            }
        }
        range.max(0.0)
    }

    fn check(&self) -> Result<()> {
        if self.materials.is_empty() {
            return Err(Error::InvalidParam("wire has no material".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;

    fn wire() -> SampleWire {
        let mut s = SampleWire::new(100.0, 100.0, 1000.0).unwrap();
        s.bc[2] = Boundary::Cut;
        s.push_material(material::silicon().unwrap());
        s
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(SampleWire::new(0.0, 100.0, 1000.0).is_err());
        assert!(SampleWire::new(100.0, -1.0, 1000.0).is_err());
        assert!(SampleWire::new(100.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn lookup_inside_and_outside() {
        let s = wire();
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 500.0)), Some(0));
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 0.0)), Some(0));
        // outside the cross-section
        assert_eq!(s.lookup_material(Vec3::new(-0.1, 50.0, 500.0)), None);
        assert_eq!(s.lookup_material(Vec3::new(50.0, 100.1, 500.0)), None);
    }

    #[test]
    fn cut_face_swallows_at_and_beyond_length() {
        let s = wire();
        let eps = 1.0e-3;
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 1000.0 + eps)), None);
        // at the face itself the ion is already gone
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 1000.0)), None);
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, -eps)), None);
    }

    #[test]
    fn infinite_extrusion_ignores_z() {
        let mut s = wire();
        s.bc[2] = Boundary::Infinite;
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, -5000.0)), Some(0));
        assert_eq!(s.lookup_material(Vec3::new(50.0, 50.0, 5000.0)), Some(0));
    }

    #[test]
    fn lookup_is_pure() {
        let s = wire();
        let pos = Vec3::new(12.5, 80.0, 999.0);
        let first = s.lookup_material(pos);
        for _ in 0..10 {
            assert_eq!(s.lookup_material(pos), first);
        }
    }

    #[test]
    fn range_reaches_nearest_face() {
        let s = wire();
        let pos = Vec3::new(50.0, 50.0, 500.0);
        let range = s.range_material(pos, Vec3::new(1.0, 0.0, 0.0));
        assert!((range - 50.0).abs() < 1e-3, "range = {range}");
        let range = s.range_material(pos, Vec3::new(0.0, 0.0, -1.0));
        assert!((range - 500.0).abs() < 1e-2, "range = {range}");
        // diagonal: x face at 50/(1/√2) ≈ 70.7 comes before z at 500*√2
        let diag = Vec3::new(1.0, 0.0, 1.0).normalized();
        let range = s.range_material(pos, diag);
        assert!((range - 70.71).abs() < 0.1, "range = {range}");
    }
}
