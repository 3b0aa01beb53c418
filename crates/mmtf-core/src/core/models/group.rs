use super::ids::ChainId;
use super::topology::Bond;
use std::fmt;
use std::ops::Range;

/// DSSP-derived secondary structure category of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    PiHelix,
    Bend,
    AlphaHelix,
    Extended,
    Helix310,
    Bridge,
    Turn,
    Coil,
    #[default]
    Undefined,
}

impl SecondaryStructure {
    /// Maps a stored code (`-1..=7`) to its category.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::PiHelix,
            1 => Self::Bend,
            2 => Self::AlphaHelix,
            3 => Self::Extended,
            4 => Self::Helix310,
            5 => Self::Bridge,
            6 => Self::Turn,
            7 => Self::Coil,
            -1 => Self::Undefined,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        match self {
            Self::PiHelix => 0,
            Self::Bend => 1,
            Self::AlphaHelix => 2,
            Self::Extended => 3,
            Self::Helix310 => 4,
            Self::Bridge => 5,
            Self::Turn => 6,
            Self::Coil => 7,
            Self::Undefined => -1,
        }
    }

    pub fn is_helix(self) -> bool {
        matches!(self, Self::PiHelix | Self::AlphaHelix | Self::Helix310)
    }

    pub fn is_strand(self) -> bool {
        matches!(self, Self::Extended | Self::Bridge)
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::PiHelix => "pi helix",
                Self::Bend => "bend",
                Self::AlphaHelix => "alpha helix",
                Self::Extended => "extended",
                Self::Helix310 => "3-10 helix",
                Self::Bridge => "bridge",
                Self::Turn => "turn",
                Self::Coil => "coil",
                Self::Undefined => "undefined",
            }
        )
    }
}

/// A residue, nucleotide, ligand or water molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,                             // Three-letter code (e.g., "ALA")
    pub number: i32,                              // Author sequence number
    pub insertion_code: Option<char>,             // Insertion code, if any
    pub chem_comp_type: String,                   // Chemical component type, may be empty
    pub single_letter_code: char,                 // One-letter code ('?' when unknown)
    pub sequence_index: Option<usize>,            // Position in the entity sequence
    pub secondary_structure: SecondaryStructure,  // DSSP category
    pub chain_id: ChainId,                        // Parent chain
    pub(crate) atoms: Range<usize>,               // Global atom index range
    pub(crate) bonds: Vec<Bond>,                  // Intra-group bonds, local atom indices
}

impl Group {
    pub fn atom_range(&self) -> Range<usize> {
        self.atoms.clone()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Converts a local atom index into a global one.
    pub fn global_atom_index(&self, local: usize) -> Option<usize> {
        (local < self.atoms.len()).then(|| self.atoms.start + local)
    }
}
