//! Physical unit definitions and conversions.
//!
//! Base units:
//! - Length: angstrom (Å)
//! - Time: femtosecond (fs)
//! - Charge: elementary charge (e)
//! - Mass: atomic mass unit (amu)
//!
//! Energies at the API boundary are in electronvolts.

/// Angstrom in meters.
pub const ANGSTROM: f64 = 1.0e-10;
/// Femtosecond in seconds.
pub const FEMTOSECOND: f64 = 1.0e-15;
/// Elementary charge in coulombs.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Atomic mass unit in kilograms.
pub const AMU: f64 = 1.660_539_066_60e-27;

/// Energy of one simulation unit expressed in joules.
pub const ENERGY_JOULE: f64 = AMU * ANGSTROM * ANGSTROM / (FEMTOSECOND * FEMTOSECOND);
/// Convert electronvolts to simulation energy units.
pub const EV_TO_SIM: f64 = ELEMENTARY_CHARGE / ENERGY_JOULE;

/// Bohr radius in angstroms.
pub const BOHR_RADIUS: f64 = 0.529_177_210_67;

/// e²/(4πε₀) in eV·Å. The Coulomb potential between charges Z1 and Z2 at
/// separation r Å is `COULOMB_EV_A * Z1 * Z2 / r` eV.
pub const COULOMB_EV_A: f64 = 14.399_645;

/// Mass density (g/cm³) divided by atomic mass (amu) times this factor
/// gives the atomic number density in atoms/Å³.
pub const DENSITY_TO_ATOMS: f64 = 0.602_214_076;

/// Lindhard-Scharff electronic stopping prefactor.
/// Se(E) = LS_PREFACTOR * Z1^(7/6) * Z2 / (Z1^(2/3) + Z2^(2/3))^(3/2)
///         * sqrt(E[eV] / M1[amu])   in eV·Å² per target atom.
pub const LS_PREFACTOR: f64 = 1.212;

/// Speed of an ion in Å/fs given its kinetic energy in eV and mass in amu.
pub fn speed(energy_ev: f32, mass_amu: f32) -> f32 {
    if energy_ev <= 0.0 || mass_amu <= 0.0 {
        return 0.0;
    }
    ((2.0 * energy_ev as f64 * EV_TO_SIM) / mass_amu as f64).sqrt() as f32
}
