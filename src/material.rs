// material.rs
// Target material composition and the per-material constants derived from it.
// A material is built up from elements, finalized once with prepare(), and
// immutable afterwards.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::ion::Ion;
use crate::simconf::Simconf;
use crate::species;
use crate::units;

#[derive(Clone, Copy, Debug)]
pub struct Element {
    /// Atomic number.
    pub z: u32,
    /// Atomic mass in amu.
    pub m: f32,
    /// Stoichiometric weight (relative abundance, need not be normalized).
    pub t: f32,
    /// Displacement threshold energy in eV.
    pub ed: f32,
}

impl Element {
    pub fn new(z: u32, m: f32, t: f32) -> Self {
        Self {
            z,
            m,
            t,
            ed: species::get_species_props(z).displacement_ev,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Material {
    /// Mass density in g/cm³.
    pub rho: f32,
    pub elements: SmallVec<[Element; 4]>,
    /// Sum of stoichiometric weights, set by prepare().
    tsum: f32,
    /// Mean atomic mass in amu, set by prepare().
    pub am: f32,
    /// Mean atomic number, set by prepare().
    pub az: f32,
    /// Atomic number density in atoms/Å³, set by prepare().
    pub arho: f32,
    prepared: bool,
}

impl Material {
    pub fn new(rho: f32) -> Self {
        Self {
            rho,
            elements: SmallVec::new(),
            tsum: 0.0,
            am: 0.0,
            az: 0.0,
            arho: 0.0,
            prepared: false,
        }
    }

    /// Append an element to the composition. Must precede prepare().
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// One-shot finalization deriving the per-material constants used by the
    /// cascade engine. Idempotent; repeated calls leave the state untouched.
    pub fn prepare(&mut self) -> Result<()> {
        if self.prepared {
            return Ok(());
        }
        if self.rho <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "material density must be positive, got {}",
                self.rho
            )));
        }
        if self.elements.is_empty() {
            return Err(Error::InvalidParam(
                "material has no elements".to_string(),
            ));
        }
        self.tsum = self.elements.iter().map(|el| el.t).sum();
        if self.tsum <= 0.0 || self.elements.iter().any(|el| el.t < 0.0 || el.m <= 0.0) {
            return Err(Error::InvalidParam(
                "stoichiometric weights must be non-negative with a positive sum".to_string(),
            ));
        }
        self.am = self.elements.iter().map(|el| el.t * el.m).sum::<f32>() / self.tsum;
        self.az = self.elements.iter().map(|el| el.t * el.z as f32).sum::<f32>() / self.tsum;
        self.arho = (self.rho as f64 * units::DENSITY_TO_ATOMS / self.am as f64) as f32;
        self.prepared = true;
        Ok(())
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Interatomic spacing in Å, used as the flight path of the solid model.
    pub fn mean_free_path(&self) -> f32 {
        self.arho.powf(-1.0 / 3.0)
    }

    /// Atomic number density of one constituent in atoms/Å³.
    pub fn number_density(&self, element: &Element) -> f32 {
        self.arho * element.t / self.tsum
    }

    /// Pick a collision partner species weighted by stoichiometry.
    pub fn choose_element(&self, simconf: &mut Simconf) -> &Element {
        let mut r = simconf.drand() * self.tsum;
        for el in &self.elements {
            if r < el.t {
                return el;
            }
            r -= el.t;
        }
        // floating-point tail: fall back to the last constituent
        self.elements.last().unwrap()
    }

    /// Lindhard-Scharff electronic stopping power dE/dx in eV/Å for the given
    /// projectile, summed over all constituents.
    pub fn electronic_stopping(&self, ion: &Ion) -> f32 {
        if ion.e <= 0.0 {
            return 0.0;
        }
        let z1 = ion.z as f64;
        let sqrt_e_over_m = (ion.e as f64 / ion.m as f64).sqrt();
        let mut de_dx = 0.0;
        for el in &self.elements {
            let z2 = el.z as f64;
            let se = units::LS_PREFACTOR * z1.powf(7.0 / 6.0) * z2
                / (z1.powf(2.0 / 3.0) + z2.powf(2.0 / 3.0)).powf(1.5)
                * sqrt_e_over_m;
            de_dx += se * self.number_density(el) as f64;
        }
        de_dx as f32
    }
}

/// Silicon at its bulk density, the default wire material.
pub fn silicon() -> Result<Material> {
    let mut m = Material::new(2.329);
    m.add_element(Element::new(14, 28.0, 1.0));
    m.prepare()?;
    Ok(m)
}

/// Amorphous SiO2, the cover-layer material of the buried wire geometry.
pub fn silicon_dioxide() -> Result<Material> {
    let mut m = Material::new(2.634);
    m.add_element(Element::new(14, 28.0, 1.0));
    m.add_element(Element::new(8, 16.0, 2.0));
    m.prepare()?;
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silicon_derived_constants() {
        let m = silicon().unwrap();
        assert!(m.is_prepared());
        // n = 2.329 * 0.6022 / 28.0 ≈ 0.0501 atoms/Å³
        assert!((m.arho - 0.0501).abs() < 0.001, "arho = {}", m.arho);
        assert!((m.am - 28.0).abs() < 1e-4);
        assert!((m.az - 14.0).abs() < 1e-4);
        // interatomic spacing ≈ 2.7 Å
        let mfp = m.mean_free_path();
        assert!(mfp > 2.5 && mfp < 3.0, "mfp = {mfp}");
    }

    #[test]
    fn prepare_is_idempotent() {
        let mut m = silicon().unwrap();
        let arho = m.arho;
        m.prepare().unwrap();
        m.prepare().unwrap();
        assert_eq!(m.arho, arho);
        assert_eq!(m.elements.len(), 1);
    }

    #[test]
    fn prepare_rejects_bad_input() {
        let mut empty = Material::new(2.0);
        assert!(empty.prepare().is_err());

        let mut negative = Material::new(-1.0);
        negative.add_element(Element::new(14, 28.0, 1.0));
        assert!(negative.prepare().is_err());
    }

    #[test]
    fn partner_choice_follows_stoichiometry() {
        let m = silicon_dioxide().unwrap();
        let mut sc = Simconf::new(1234);
        let mut oxygen = 0usize;
        let n = 30_000;
        for _ in 0..n {
            if m.choose_element(&mut sc).z == 8 {
                oxygen += 1;
            }
        }
        let frac = oxygen as f32 / n as f32;
        assert!((frac - 2.0 / 3.0).abs() < 0.02, "O fraction = {frac}");
    }

    #[test]
    fn stopping_grows_with_sqrt_energy() {
        let m = silicon().unwrap();
        let sc = Simconf::new(0);
        let mut ion = Ion::new(&sc, 5, 11.0, 40.0e3);
        let s1 = m.electronic_stopping(&ion);
        ion.e = 160.0e3;
        let s2 = m.electronic_stopping(&ion);
        assert!((s2 / s1 - 2.0).abs() < 1e-3, "ratio = {}", s2 / s1);
        // boron in silicon at 160 keV loses roughly 26 eV/Å
        assert!(s2 > 15.0 && s2 < 40.0, "Se = {s2} eV/Å");
    }
}
