use thiserror::Error;

/// Covalent bond order as stored in bond order columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
    Quadruple = 4,
}

impl BondOrder {
    /// The stored column value.
    pub fn value(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Bond order {0} is outside 1..=4")]
pub struct InvalidBondOrder(pub i32);

impl TryFrom<i32> for BondOrder {
    type Error = InvalidBondOrder;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Single,
            2 => Self::Double,
            3 => Self::Triple,
            4 => Self::Quadruple,
            other => return Err(InvalidBondOrder(other)),
        })
    }
}

/// A bond between two atoms. Whether the indices are local to a group or
/// global to the structure depends on where the bond is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// The bonded partner of `atom`, if `atom` is one of the two ends.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        match atom {
            a if a == self.atom1 => Some(self.atom2),
            a if a == self.atom2 => Some(self.atom1),
            _ => None,
        }
    }
}
