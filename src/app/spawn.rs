// app/spawn.rs
// Primary knock-on generation: samples entry points on the target surface
// for a tilted beam and builds the PKA ion aimed along it.

use ultraviolet::Vec3;

use crate::config;
use crate::ion::Ion;
use crate::run_config::BeamStep;
use crate::sample::Sample;
use crate::simconf::Simconf;

/// Cap on surface-sampling retries before falling back to the wire's top
/// center. Rejection only triggers for rays that miss the material entirely.
pub const SPAWN_ATTEMPTS: usize = 10_000;

/// Beam direction for a tilt angle from the wire axis (0 = parallel).
pub fn beam_direction(theta: f32) -> Vec3 {
    Vec3::new(0.0, theta.sin(), theta.cos()).normalized()
}

/// Build one primary for a free-standing wire. The entry point is sampled on
/// the top face for parallel incidence, otherwise on the top or side face by
/// casting the beam ray onto the wire's bounding box.
pub fn spawn_wire_pka(
    simconf: &mut Simconf,
    sample: &dyn Sample,
    w: [f32; 3],
    beam: &BeamStep,
    theta: f32,
) -> Ion {
    let mut pka = Ion::new(simconf, beam.z, beam.m, beam.energy_ev);
    let dir = beam_direction(theta);
    pka.set_dir(dir);

    for _ in 0..SPAWN_ATTEMPTS {
        let pos = if theta == 0.0 {
            // parallel to the wire: start on top of it
            Vec3::new(simconf.drand() * w[0], simconf.drand() * w[1], 0.0)
        } else {
            // start on the side face or, for rays that pass above the wire,
            // on the slanted top entry
            let x = simconf.drand() * w[0];
            let z_min = -w[1] / theta.tan();
            let z = simconf.drand() * (w[2] - z_min) + z_min;
            // rays starting beyond the wire length would enter the substrate
            if z >= w[2] {
                continue;
            }
            let t = if z < 0.0 { -z / dir.z } else { 0.0 };
            Vec3::new(x, t * dir.y, z + t * dir.z)
        };
        if sample.lookup_material(pos).is_some() {
            pka.pos = pos;
            return pka;
        }
    }

    pka.pos = Vec3::new(0.5 * w[0], 0.5 * w[1], 0.0);
    pka
}

/// Build one primary for a buried wire: straggling in the overcoat cannot be
/// anticipated, so the beam is shot onto the whole overcoat plane.
pub fn spawn_buried_pka(
    simconf: &mut Simconf,
    w: [f32; 3],
    beam: &BeamStep,
    theta: f32,
) -> Ion {
    let mut pka = Ion::new(simconf, beam.z, beam.m, beam.energy_ev);
    pka.set_dir(beam_direction(theta));
    pka.pos = Vec3::new(
        (simconf.drand() - 0.5) * (w[2] + w[0]),
        (simconf.drand() - 0.5) * (w[2] + w[1]),
        -config::COVER_LAYER_DEPTH,
    );
    pka
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;
    use crate::sample::{Boundary, SampleBurriedWire, SampleWire};
    use crate::run_config::BeamStep;

    fn beam() -> BeamStep {
        BeamStep { z: 5, m: 11.0, energy_ev: 160.0e3, dose: 1.5e13 }
    }

    fn wire() -> SampleWire {
        let mut s = SampleWire::new(100.0, 100.0, 1000.0).unwrap();
        s.bc[2] = Boundary::Cut;
        s.push_material(material::silicon().unwrap());
        s
    }

    #[test]
    fn parallel_beam_starts_on_the_top_face() {
        let sample = wire();
        let mut sc = Simconf::new(17);
        for _ in 0..100 {
            let pka = spawn_wire_pka(&mut sc, &sample, sample.w, &beam(), 0.0);
            assert_eq!(pka.pos.z, 0.0);
            assert!(sample.lookup_material(pka.pos).is_some());
            assert!((pka.dir - Vec3::unit_z()).mag() < 1e-6);
        }
    }

    #[test]
    fn tilted_beam_entry_points_lie_in_material() {
        let sample = wire();
        let mut sc = Simconf::new(23);
        let theta = 45.0f32.to_radians();
        for _ in 0..200 {
            let pka = spawn_wire_pka(&mut sc, &sample, sample.w, &beam(), theta);
            assert!(
                sample.lookup_material(pka.pos).is_some(),
                "entry point {:?} not in material",
                pka.pos
            );
            assert!(pka.pos.z < sample.w[2]);
        }
    }

    #[test]
    fn buried_beam_starts_on_the_overcoat_plane() {
        let mut sample = SampleBurriedWire::new(100.0, 100.0, 1000.0).unwrap();
        sample.push_material(material::silicon().unwrap());
        sample.push_material(material::silicon_dioxide().unwrap());
        let mut sc = Simconf::new(29);
        let w = sample.w();
        for _ in 0..100 {
            let pka = spawn_buried_pka(&mut sc, w, &beam(), 0.0);
            assert_eq!(pka.pos.z, -250.0);
            // the whole overcoat plane is cover material
            assert_eq!(sample.lookup_material(pka.pos), Some(1));
        }
    }
}
