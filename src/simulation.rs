// simulation.rs
// The cascade driver: owns the recoil FIFO and drains it to exhaustion for
// each primary knock-on. Particles are processed breadth-first in spawn
// order; every popped ion is handed to the engine exactly once, tallied, and
// discarded.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::ion::Ion;
use crate::sample::Sample;
use crate::simconf::Simconf;
use crate::tally::Tally;
use crate::trim;

/// Bookkeeping for one or more cascades.
#[derive(Clone, Copy, Debug, Default)]
pub struct CascadeStats {
    /// Engine invocations; equals the number of particles ever enqueued.
    pub processed: u64,
    /// Recoils created by the engine.
    pub spawned: u64,
    /// Deepest recoil generation seen.
    pub max_generation: u32,
}

impl CascadeStats {
    pub fn absorb(&mut self, other: CascadeStats) {
        self.processed += other.processed;
        self.spawned += other.spawned;
        self.max_generation = self.max_generation.max(other.max_generation);
    }
}

pub struct Simulation<'a> {
    pub simconf: Simconf,
    sample: &'a dyn Sample,
    recoils: VecDeque<Ion>,
    pub tally: Tally,
}

impl<'a> Simulation<'a> {
    /// Build a driver over a fixed sample. Shape/material misconfiguration
    /// is fatal here, before any transport starts.
    pub fn new(simconf: Simconf, sample: &'a dyn Sample, tally: Tally) -> Result<Self> {
        sample.check()?;
        if sample.materials().iter().any(|m| !m.is_prepared()) {
            return Err(Error::InvalidParam(
                "all sample materials must be prepared".to_string(),
            ));
        }
        Ok(Self {
            simconf,
            sample,
            recoils: VecDeque::new(),
            tally,
        })
    }

    pub fn sample(&self) -> &dyn Sample {
        self.sample
    }

    /// Run one primary's cascade to exhaustion. Returns when the queue is
    /// empty; termination is guaranteed because every recoil spawns with
    /// strictly less energy than its parent held at that moment.
    pub fn run_cascade(&mut self, pka: Ion) -> CascadeStats {
        crate::profile_scope!("run_cascade");
        debug_assert!(self.recoils.is_empty());
        let mut stats = CascadeStats::default();
        self.recoils.push_back(pka);
        while let Some(mut ion) = self.recoils.pop_front() {
            self.sample.record_averages(&ion);
            stats.spawned +=
                trim::trim(&mut self.simconf, self.sample, &mut ion, &mut self.recoils) as u64;
            stats.processed += 1;
            stats.max_generation = stats.max_generation.max(ion.gen);
            self.tally.record(self.sample, &ion);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;
    use crate::sample::{Boundary, SampleBurriedWire, SampleLayers, SampleWire};
    use ultraviolet::Vec3;

    fn silicon_wire() -> SampleWire {
        let mut s = SampleWire::new(100.0, 100.0, 1000.0).unwrap();
        s.bc[2] = Boundary::Cut;
        s.push_material(material::silicon().unwrap());
        s
    }

    #[test]
    fn construction_validates_the_sample() {
        let bare = SampleWire::new(10.0, 10.0, 10.0).unwrap();
        let tally = Tally::new(10.0, 10, false);
        assert!(Simulation::new(Simconf::new(0), &bare, tally).is_err());

        let mut underfilled = SampleBurriedWire::new(10.0, 10.0, 10.0).unwrap();
        underfilled.push_material(material::silicon().unwrap());
        let tally = Tally::new(10.0, 10, false);
        assert!(Simulation::new(Simconf::new(0), &underfilled, tally).is_err());

        let mut lopsided = SampleLayers::new(vec![100.0, 200.0]).unwrap();
        lopsided.push_material(material::silicon().unwrap());
        let tally = Tally::new(300.0, 10, false);
        assert!(Simulation::new(Simconf::new(0), &lopsided, tally).is_err());
    }

    #[test]
    fn boron_cascade_in_a_silicon_wire_drains() {
        let sample = silicon_wire();
        let tally = Tally::new(1000.0, 100, true);
        let mut sim = Simulation::new(Simconf::new(987), &sample, tally).unwrap();

        let mut pka = Ion::new(&sim.simconf, 5, 11.0, 160.0e3);
        pka.pos = Vec3::new(50.0, 50.0, 0.0);
        pka.set_dir(Vec3::new(0.0, 0.0, 1.0));

        let stats = sim.run_cascade(pka);

        // each enqueued particle ran through the engine exactly once
        assert_eq!(stats.processed, stats.spawned + 1);
        assert!(stats.spawned > 0, "a 160 keV primary must displace something");
        assert!(stats.max_generation >= 1);

        // tallied ions rest inside the wire material by construction
        for &(z, pos) in &sim.tally.xyz {
            assert_eq!(sample.lookup_material(pos), Some(0), "ion Z={z} at {pos:?}");
        }
        assert!(sim.tally.xyz.iter().all(|&(_, p)| p.z >= 0.0 && p.z < 1000.0));
    }

    #[test]
    fn primary_on_the_cut_face_is_not_tallied() {
        let sample = silicon_wire();
        let tally = Tally::new(1000.0, 100, true);
        let mut sim = Simulation::new(Simconf::new(3), &sample, tally).unwrap();
        let mut pka = Ion::new(&sim.simconf, 5, 11.0, 160.0e3);
        pka.pos = Vec3::new(50.0, 50.0, 1000.0);
        pka.set_dir(Vec3::new(0.0, 0.0, 1.0));
        let stats = sim.run_cascade(pka);
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.spawned, 0);
        assert_eq!(sim.tally.total_counts(), 0);
    }

    #[test]
    fn cascades_in_a_buried_wire_terminate() {
        let mut sample = SampleBurriedWire::new(200.0, 200.0, 2000.0).unwrap();
        sample.push_material(material::silicon().unwrap());
        sample.push_material(material::silicon_dioxide().unwrap());
        let tally = Tally::new(2000.0, 100, false);
        let mut sim = Simulation::new(Simconf::new(55), &sample, tally).unwrap();

        let mut pka = Ion::new(&sim.simconf, 5, 11.0, 60.0e3);
        pka.pos = Vec3::new(100.0, 100.0, -250.0);
        pka.set_dir(Vec3::new(0.0, 0.0, 1.0));
        let stats = sim.run_cascade(pka);
        assert_eq!(stats.processed, stats.spawned + 1);
    }
}
