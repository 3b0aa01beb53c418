use crate::core::models::group::SecondaryStructure;
use phf::{Map, phf_map};

/// One-letter DSSP symbols. Blank, `-` and `C` all denote coil.
static DSSP_SYMBOLS: Map<&'static str, SecondaryStructure> = phf_map! {
    "I" => SecondaryStructure::PiHelix,
    "S" => SecondaryStructure::Bend,
    "H" => SecondaryStructure::AlphaHelix,
    "E" => SecondaryStructure::Extended,
    "G" => SecondaryStructure::Helix310,
    "B" => SecondaryStructure::Bridge,
    "T" => SecondaryStructure::Turn,
    "C" => SecondaryStructure::Coil,
    "-" => SecondaryStructure::Coil,
    "" => SecondaryStructure::Coil,
};

pub fn from_symbol(symbol: &str) -> Option<SecondaryStructure> {
    DSSP_SYMBOLS.get(symbol.trim().to_uppercase().as_str()).copied()
}

pub fn symbol(ss: SecondaryStructure) -> Option<char> {
    match ss {
        SecondaryStructure::PiHelix => Some('I'),
        SecondaryStructure::Bend => Some('S'),
        SecondaryStructure::AlphaHelix => Some('H'),
        SecondaryStructure::Extended => Some('E'),
        SecondaryStructure::Helix310 => Some('G'),
        SecondaryStructure::Bridge => Some('B'),
        SecondaryStructure::Turn => Some('T'),
        SecondaryStructure::Coil => Some('C'),
        SecondaryStructure::Undefined => None,
    }
}
