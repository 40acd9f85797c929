// tally.rs
// Accumulation sinks for finished particles: an optional coordinate list for
// .xyz dumps and a depth-binned per-species histogram for concentration
// profiles. Pure accumulators with no feedback into the transport core;
// merging is an associative sum so parallel cascades can be reduced in any
// order.

use std::collections::HashMap;

use ultraviolet::Vec3;

use crate::ion::Ion;
use crate::sample::Sample;

pub struct Tally {
    bin_width: f32,
    nbins: usize,
    record_xyz: bool,
    /// (atomic number, resting position) per tallied ion.
    pub xyz: Vec<(u32, Vec3)>,
    /// Depth histogram along the wire axis, one row per atomic number.
    pub bins: HashMap<u32, Vec<u64>>,
}

impl Tally {
    pub fn new(length: f32, nbins: usize, record_xyz: bool) -> Self {
        Self {
            bin_width: length / nbins as f32,
            nbins,
            record_xyz,
            xyz: Vec::new(),
            bins: HashMap::new(),
        }
    }

    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    /// Tally one fully processed ion. Only ions resting in the wire material
    /// (index 0) inside the binned depth range are counted.
    pub fn record(&mut self, sample: &dyn Sample, ion: &Ion) {
        if sample.lookup_material(ion.pos) != Some(0) {
            return;
        }
        let bin = (ion.pos.z / self.bin_width).floor() as i64;
        if bin < 0 || bin >= self.nbins as i64 {
            return;
        }
        if self.record_xyz {
            self.xyz.push((ion.z, ion.pos));
        }
        self.bins.entry(ion.z).or_insert_with(|| vec![0; self.nbins])[bin as usize] += 1;
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: Tally) {
        self.xyz.extend(other.xyz);
        for (z, row) in other.bins {
            let own = self.bins.entry(z).or_insert_with(|| vec![0; self.nbins]);
            for (a, b) in own.iter_mut().zip(row) {
                *a += b;
            }
        }
    }

    pub fn total_counts(&self) -> u64 {
        self.bins.values().flatten().sum()
    }
}
