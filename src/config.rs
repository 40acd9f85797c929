// Centralized configuration for transport parameters

// ====================
// Ion Parameters
// ====================
/// Energy (eV) below which an ion is no longer followed.
pub const FINAL_ENERGY_EV: f32 = 3.0;
/// Default displacement threshold energy (eV) for recoil generation.
pub const DEFAULT_DISPLACEMENT_EV: f32 = 25.0;
/// Tag value assigned to primary knock-on ions.
pub const PKA_TAG: i32 = -1;

// ====================
// Cascade Engine
// ====================
/// Hard cap on collision steps per ion. An ion that exhausts the guard is
/// classified as stopped rather than looping on a degenerate input.
pub const MAX_TRIM_STEPS: usize = 100_000;
/// Sentinel distance returned by `range_material` when no boundary along the
/// flight direction is tracked by the geometry.
pub const RANGE_SENTINEL: f32 = 1.0e5;
/// Overshoot (Å) added to a boundary-limited flight so the ion ends up just
/// inside the next region.
pub const BOUNDARY_NUDGE: f32 = 1.0e-3;
/// Newton iteration cap for the distance-of-closest-approach solve.
pub const DOCA_MAX_ITERATIONS: usize = 20;
/// Squared-error tolerance terminating the Newton solve.
pub const DOCA_TOLERANCE: f64 = 1.0e-9;

// ====================
// Geometry
// ====================
/// Thickness (Å) of the oxide overcoat above a buried wire.
pub const COVER_LAYER_DEPTH: f32 = 250.0;

// ====================
// Driver / Output
// ====================
/// Number of depth bins in the .ldat concentration profile.
pub const DEPTH_BINS: usize = 100;
/// Progress is logged to stderr every this many primaries.
pub const PKA_LOG_INTERVAL: usize = 10_000;
/// Coordinate scale divisor applied when writing .xyz dumps.
pub const XYZ_SCALE: f32 = 100.0;

// ====================
// Threading
// ====================
pub const MIN_THREADS: usize = 3;
pub const THREADS_LEAVE_FREE: usize = 2;
