// sample/mod.rs
// Target geometry abstraction: maps positions to materials and reports the
// distance to the next material boundary along a flight direction.

pub mod buried_wire;
pub mod layers;
pub mod wire;

pub use buried_wire::SampleBurriedWire;
pub use layers::SampleLayers;
pub use wire::SampleWire;

use ultraviolet::Vec3;

use crate::config;
use crate::error::Result;
use crate::ion::Ion;
use crate::material::Material;

/// Per-axis boundary condition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Boundary {
    /// The axis is unbounded; the coordinate is never checked.
    Infinite,
    /// Crossing the face at/after the nominal extent leaves the simulation.
    Cut,
}

/// Capability set shared by all target shapes. Implementations own their
/// material list; a material's identity is its index in that list, and `None`
/// stands for vacuum / out of bounds.
///
/// `lookup_material` must be a pure function of the position and the
/// immutable shape parameters. Positions that cannot be assigned to any
/// material map to `None`, never to an error; the cascade engine treats that
/// as the normal EXITED termination.
pub trait Sample: Sync {
    fn materials(&self) -> &[Material];

    fn lookup_material(&self, pos: Vec3) -> Option<usize>;

    /// Distance to the next material boundary along `dir`, or a large
    /// sentinel when the shape does not track boundary crossings.
    fn range_material(&self, _pos: Vec3, _dir: Vec3) -> f32 {
        config::RANGE_SENTINEL
    }

    /// Optional per-particle sampling hook invoked by the driver before each
    /// cascade step. Must not mutate the ion's physical state.
    fn record_averages(&self, _ion: &Ion) {}

    /// Validate shape/material consistency. Called once when a simulation is
    /// constructed; violations are fatal configuration errors.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}
