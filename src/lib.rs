pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod ion;
pub mod material;
pub mod profiler;
pub mod run_config;
pub mod sample;
pub mod simconf;
pub mod simulation;
pub mod species;
pub mod tally;
pub mod trim;
pub mod units;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
