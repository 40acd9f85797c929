// io.rs
// Output writers for the driver: .xyz coordinate dumps, .ldat depth
// concentration profiles, and a JSON run summary. Pure sinks; nothing here
// feeds back into the transport core.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config;
use crate::species;
use crate::tally::Tally;

/// Write the tallied resting positions as an .xyz file. Coordinates are
/// scaled down by the conventional factor used by the downstream tooling.
pub fn write_xyz<P: AsRef<Path>>(path: P, tally: &Tally) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", tally.xyz.len())?;
    writeln!(out)?;
    for &(z, pos) in &tally.xyz {
        writeln!(
            out,
            "{} {} {} {}",
            species::symbol(z),
            pos.x / config::XYZ_SCALE,
            pos.y / config::XYZ_SCALE,
            pos.z / config::XYZ_SCALE,
        )?;
    }
    out.flush()
}

/// Write the depth profile normalized to atoms per nm³ per dose multiplier.
/// One column per species present, ordered by atomic number.
pub fn write_ldat<P: AsRef<Path>>(
    path: P,
    tally: &Tally,
    cross_section: (f32, f32),
    multiplier: f32,
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let dl = tally.bin_width();
    // bin volume in nm³
    let dv = 1.0e-3 * dl * cross_section.0 * cross_section.1;
    let mut zs: Vec<u32> = tally.bins.keys().copied().collect();
    zs.sort_unstable();

    write!(out, "# depth")?;
    for &z in &zs {
        write!(out, " {}", species::symbol(z))?;
    }
    writeln!(out)?;

    let nbins = tally.bins.values().next().map_or(0, |row| row.len());
    for bin in 0..nbins {
        write!(out, "{}", bin as f32 * dl)?;
        for &z in &zs {
            write!(out, " {}", tally.bins[&z][bin] as f32 / (multiplier * dv))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

#[derive(Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub primaries: u64,
    pub particles_processed: u64,
    pub recoils_spawned: u64,
    pub max_generation: u32,
    pub tallied: u64,
    pub elapsed_seconds: f64,
}

pub fn write_summary<P: AsRef<Path>>(path: P, summary: &RunSummary) -> std::io::Result<()> {
    let out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(out, summary)?;
    Ok(())
}
