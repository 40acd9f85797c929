// ion.rs
// Mutable state of one moving projectile or recoil: position, direction,
// species, energy, generation and lifecycle state. An ion exists only while
// it sits in the recoil queue or inside the engine processing it.

use ultraviolet::Vec3;

use crate::config;
use crate::simconf::Simconf;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IonState {
    Moving,
    /// Energy fell below the final-energy threshold.
    Stopped,
    /// Left all materials of the sample.
    Exited,
}

#[derive(Clone, Debug)]
pub struct Ion {
    pub pos: Vec3,
    /// Unit flight direction. Mutate through `set_dir` only.
    pub dir: Vec3,
    /// Atomic number.
    pub z: u32,
    /// Atomic mass in amu.
    pub m: f32,
    /// Kinetic energy in eV.
    pub e: f32,
    /// Final energy in eV; below this the ion counts as stopped.
    pub ef: f32,
    /// Accumulated flight time in fs.
    pub t: f32,
    pub id: u64,
    /// 0 for a primary knock-on, parent generation + 1 for recoils.
    pub gen: u32,
    /// Free-form label propagated by the driver (-1 for primaries).
    pub tag: i32,
    pub state: IonState,
}

impl Ion {
    /// Construct a primary knock-on ion at rest position zero, flying along +z.
    pub fn new(simconf: &Simconf, z: u32, m: f32, e: f32) -> Self {
        Self {
            pos: Vec3::zero(),
            dir: Vec3::unit_z(),
            z,
            m,
            e,
            ef: simconf.final_energy,
            t: 0.0,
            id: simconf.next_ion_id(),
            gen: 0,
            tag: config::PKA_TAG,
            state: IonState::Moving,
        }
    }

    /// Construct a recoil spawned by `parent` at the collision point. Copies
    /// the parent's clock, position and tag; species and energy come from the
    /// collision kinematics. No back-reference to the parent is kept.
    pub fn recoil_from(parent: &Ion, simconf: &Simconf, z: u32, m: f32, e: f32) -> Self {
        Self {
            pos: parent.pos,
            dir: parent.dir,
            z,
            m,
            e,
            ef: simconf.final_energy,
            t: parent.t,
            id: simconf.next_ion_id(),
            gen: parent.gen + 1,
            tag: parent.tag,
            state: IonState::Moving,
        }
    }

    /// Set the flight direction, renormalizing against floating-point drift.
    /// A degenerate zero-length input leaves the previous direction in place.
    pub fn set_dir(&mut self, dir: Vec3) {
        let mag = dir.mag();
        if mag > 1.0e-12 {
            self.dir = dir / mag;
        }
    }

    /// Current speed in Å/fs.
    pub fn speed(&self) -> f32 {
        crate::units::speed(self.e, self.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_starts_moving_at_generation_zero() {
        let sc = Simconf::new(0);
        let ion = Ion::new(&sc, 5, 11.0, 160.0e3);
        assert_eq!(ion.gen, 0);
        assert_eq!(ion.tag, config::PKA_TAG);
        assert_eq!(ion.state, IonState::Moving);
        assert_eq!(ion.ef, config::FINAL_ENERGY_EV);
        assert_eq!(ion.t, 0.0);
    }

    #[test]
    fn recoil_inherits_clock_position_and_bumps_generation() {
        let sc = Simconf::new(0);
        let mut parent = Ion::new(&sc, 5, 11.0, 1000.0);
        parent.pos = Vec3::new(1.0, 2.0, 3.0);
        parent.t = 7.5;
        parent.gen = 2;
        let rec = Ion::recoil_from(&parent, &sc, 14, 28.0, 50.0);
        assert_eq!(rec.gen, 3);
        assert_eq!(rec.t, parent.t);
        assert_eq!(rec.pos, parent.pos);
        assert_eq!(rec.z, 14);
        assert_eq!(rec.e, 50.0);
        assert_ne!(rec.id, parent.id);
        assert_eq!(rec.state, IonState::Moving);
    }

    #[test]
    fn set_dir_always_renormalizes() {
        let sc = Simconf::new(0);
        let mut ion = Ion::new(&sc, 5, 11.0, 1000.0);
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0e-3, 2.0e-3, 0.5),
            Vec3::new(1.0e4, -2.0e4, 3.0e4),
        ] {
            ion.set_dir(v);
            assert!((ion.dir.mag() - 1.0).abs() < 1.0e-5, "|dir| = {}", ion.dir.mag());
        }
    }

    #[test]
    fn zero_direction_is_rejected() {
        let sc = Simconf::new(0);
        let mut ion = Ion::new(&sc, 5, 11.0, 1000.0);
        let before = ion.dir;
        ion.set_dir(Vec3::zero());
        assert_eq!(ion.dir, before);
        assert!((ion.dir.mag() - 1.0).abs() < 1.0e-6);
    }
}
