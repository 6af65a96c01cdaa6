use serde::{Deserialize, Serialize};

/// Chemical symbols of elements 1 to 118, in atomic-number order.
pub const ATOMIC_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Gudrun accepts deuterium and tritium under their own symbols.
const HYDROGEN_ISOTOPES: [&str; 2] = ["D", "T"];

pub fn is_known_symbol(symbol: &str) -> bool {
    ATOMIC_SYMBOLS.contains(&symbol) || HYDROGEN_ISOTOPES.contains(&symbol)
}

/// One line of an atomic composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub atomic_symbol: String,
    /// `0` selects the natural isotopic mixture.
    pub mass_number: u32,
    pub abundance: f64,
}

impl Element {
    pub fn new(atomic_symbol: impl Into<String>, mass_number: u32, abundance: f64) -> Self {
        Self {
            atomic_symbol: atomic_symbol.into(),
            mass_number,
            abundance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols() {
        assert!(is_known_symbol("H"));
        assert!(is_known_symbol("Og"));
        assert!(is_known_symbol("D"));
        assert!(!is_known_symbol("Xx"));
        assert!(!is_known_symbol("h"));
    }
}
