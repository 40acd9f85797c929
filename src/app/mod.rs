// app/mod.rs
// The simulation driver: builds the target from the run configuration,
// converts doses to ion counts, runs every primary cascade (parallel across
// primaries, one RNG stream per worker) and writes the output files.

use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::config;
use crate::error::Result;
use crate::io;
use crate::run_config::{BeamStep, RunConfig};
use crate::sample::{Boundary, Sample, SampleBurriedWire, SampleWire};
use crate::simconf::Simconf;
use crate::simulation::{CascadeStats, Simulation};
use crate::tally::Tally;

pub mod spawn;

pub fn run() -> Result<()> {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(config::MIN_THREADS)
        - config::THREADS_LEAVE_FREE;
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();

    let run_config = RunConfig::load_default();
    run_with(&run_config)
}

/// Irradiated area in Å² seen by the beam, used to turn a fluence into an
/// ion count.
fn irradiated_area(w: [f32; 3], buried: bool, theta: f32) -> f32 {
    if buried {
        // the whole overcoat plane is shot at
        (w[2] + w[0]) * (w[2] + w[1])
    } else {
        // slanted top face plus the projected side
        theta.cos() * w[0] * w[1] + theta.sin() * w[2] * w[0]
    }
}

fn ion_count(step: &BeamStep, area: f32, multiplier: f32) -> usize {
    // 1 Å² = 1e-16 cm²
    (step.dose * area * 1.0e-16 * multiplier) as usize
}

pub fn run_with(run_config: &RunConfig) -> Result<()> {
    let started = Instant::now();
    let theta = run_config.angle_deg.to_radians();
    let w = run_config.geometry.extents();
    let buried = run_config.geometry.buried;

    // target assembly
    let sample: Box<dyn Sample> = if buried {
        let mut s = SampleBurriedWire::new(w[0], w[1], w[2])?;
        for m in &run_config.material {
            s.push_material(m.build()?);
        }
        Box::new(s)
    } else {
        let mut s = SampleWire::new(w[0], w[1], w[2])?;
        s.bc[2] = Boundary::Cut;
        for m in run_config.material.iter().take(1) {
            s.push_material(m.build()?);
        }
        Box::new(s)
    };
    sample.check()?;

    let seed = run_config.seed.unwrap_or_else(|| fastrand::Rng::new().u64(..));
    let mut master = Simconf::new(seed);
    eprintln!("seed {seed}, {} beam step(s)", run_config.beam.len());

    let area = irradiated_area(w, buried, theta);
    let mut tally = Tally::new(w[2], config::DEPTH_BINS, run_config.xyz_out);
    let mut stats = CascadeStats::default();
    let mut primaries: u64 = 0;
    let progress = AtomicU64::new(0);

    for (s, step) in run_config.beam.iter().enumerate() {
        let count = ion_count(step, area, run_config.multiplier);
        eprintln!(
            "ion {s}: Z={} m={} E={} eV, {count} primaries",
            step.z, step.m, step.energy_ev
        );
        primaries += count as u64;

        // one private RNG stream and tally per worker; cascades are
        // independent, so only the final merge couples them
        let workers = rayon::current_num_threads().max(1);
        let base = count / workers;
        let extra = count % workers;
        let jobs: Vec<(Simconf, usize)> = (0..workers)
            .map(|i| (master.fork(), base + usize::from(i < extra)))
            .collect();

        let results: Result<Vec<(Tally, CascadeStats)>> = jobs
            .into_par_iter()
            .map(|(simconf, n)| {
                let worker_tally = Tally::new(w[2], config::DEPTH_BINS, run_config.xyz_out);
                let mut sim = Simulation::new(simconf, sample.as_ref(), worker_tally)?;
                let mut worker_stats = CascadeStats::default();
                for _ in 0..n {
                    let pka = if buried {
                        spawn::spawn_buried_pka(&mut sim.simconf, w, step, theta)
                    } else {
                        spawn::spawn_wire_pka(&mut sim.simconf, sample.as_ref(), w, step, theta)
                    };
                    worker_stats.absorb(sim.run_cascade(pka));
                    let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % config::PKA_LOG_INTERVAL as u64 == 0 {
                        eprintln!("pka #{done}");
                    }
                }
                Ok((sim.tally, worker_stats))
            })
            .collect();
        for (worker_tally, worker_stats) in results? {
            tally.merge(worker_tally);
            stats.absorb(worker_stats);
        }
    }

    if run_config.xyz_out {
        io::write_xyz(format!("{}.xyz", run_config.basename), &tally)?;
    }
    if run_config.ldat_out {
        io::write_ldat(
            format!("{}.ldat", run_config.basename),
            &tally,
            (w[0], w[1]),
            run_config.multiplier,
        )?;
    }
    let summary = io::RunSummary {
        seed,
        primaries,
        particles_processed: stats.processed,
        recoils_spawned: stats.spawned,
        max_generation: stats.max_generation,
        tallied: tally.total_counts(),
        elapsed_seconds: started.elapsed().as_secs_f64(),
    };
    io::write_summary(format!("{}.json", run_config.basename), &summary)?;
    println!(
        "{} primaries, {} particles, {} recoils, max generation {}, {:.1} s",
        primaries,
        stats.processed,
        stats.spawned,
        stats.max_generation,
        summary.elapsed_seconds
    );
    Ok(())
}
