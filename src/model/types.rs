use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(pub(crate) String);

/// Chemical element, identified by atomic number.
///
/// Trajectory analysis only needs to carry elements through to the XYZ
/// output and species formulas, so this is a thin wrapper over the atomic
/// number with symbol lookup rather than a full periodic-table enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

impl Element {
    /// Looks up an element by atomic number (1..=118).
    pub fn from_atomic_number(z: u8) -> Option<Self> {
        if (1..=118).contains(&z) { Some(Self(z)) } else { None }
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn symbol(&self) -> &'static str {
        SYMBOLS[self.0 as usize - 1]
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol, tolerating the case conventions found in
    /// structure files ("CL", "cl", "Cl" all parse as chlorine).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
            None => return Err(ParseElementError(s.to_string())),
        };

        SYMBOLS
            .iter()
            .position(|&sym| sym == normalized)
            .map(|idx| Self(idx as u8 + 1))
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_letter_symbols() {
        assert_eq!("O".parse::<Element>().unwrap().symbol(), "O");
        assert_eq!("H".parse::<Element>().unwrap().atomic_number(), 1);
    }

    #[test]
    fn parses_two_letter_symbols_case_insensitively() {
        for input in ["Cl", "CL", "cl"] {
            let element = input.parse::<Element>().unwrap();
            assert_eq!(element.symbol(), "Cl");
            assert_eq!(element.atomic_number(), 17);
        }
    }

    #[test]
    fn trims_pdb_style_padding() {
        assert_eq!(" Al ".parse::<Element>().unwrap().symbol(), "Al");
    }

    #[test]
    fn rejects_unknown_symbols() {
        assert!("Xx".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
        assert!("CL1".parse::<Element>().is_err());
    }

    #[test]
    fn atomic_number_bounds() {
        assert!(Element::from_atomic_number(0).is_none());
        assert!(Element::from_atomic_number(119).is_none());
        assert_eq!(Element::from_atomic_number(118).unwrap().symbol(), "Og");
    }

    #[test]
    fn display_matches_symbol() {
        let li = "Li".parse::<Element>().unwrap();
        assert_eq!(format!("{}", li), "Li");
    }
}
