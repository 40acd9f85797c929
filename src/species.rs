use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config;

/// Chemical symbols indexed by atomic number - 1.
pub static SYMBOLS: [&str; 92] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U",
];

/// Symbol for an atomic number, or "X" when outside the table.
pub fn symbol(z: u32) -> &'static str {
    match z {
        1..=92 => SYMBOLS[(z - 1) as usize],
        _ => "X",
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesProps {
    /// Displacement threshold energy in eV.
    pub displacement_ev: f32,
}

/// Per-element overrides of the displacement threshold. Values for elements
/// not listed here fall back to the default.
pub static SPECIES_PROPERTIES: Lazy<HashMap<u32, SpeciesProps>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // common semiconductor / oxide constituents
    m.insert(6, SpeciesProps { displacement_ev: 28.0 }); // C
    m.insert(8, SpeciesProps { displacement_ev: 28.0 }); // O
    m.insert(13, SpeciesProps { displacement_ev: 27.0 }); // Al
    m.insert(14, SpeciesProps { displacement_ev: 15.0 }); // Si
    m.insert(31, SpeciesProps { displacement_ev: 25.0 }); // Ga
    m.insert(32, SpeciesProps { displacement_ev: 21.0 }); // Ge
    m.insert(33, SpeciesProps { displacement_ev: 25.0 }); // As
    m
});

/// Species properties for an atomic number, falling back to defaults.
pub fn get_species_props(z: u32) -> SpeciesProps {
    SPECIES_PROPERTIES.get(&z).copied().unwrap_or(SpeciesProps {
        displacement_ev: config::DEFAULT_DISPLACEMENT_EV,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_cover_relevant_elements() {
        assert_eq!(symbol(5), "B");
        assert_eq!(symbol(14), "Si");
        assert_eq!(symbol(15), "P");
        assert_eq!(symbol(92), "U");
        assert_eq!(symbol(0), "X");
        assert_eq!(symbol(120), "X");
    }

    #[test]
    fn props_fall_back_to_default() {
        assert_eq!(get_species_props(14).displacement_ev, 15.0);
        assert_eq!(
            get_species_props(5).displacement_ev,
            config::DEFAULT_DISPLACEMENT_EV
        );
    }
}
