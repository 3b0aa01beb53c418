use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Polymer,
    NonPolymer,
    Water,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid entity type string: '{0}'")]
pub struct ParseEntityTypeError(pub String);

impl FromStr for EntityType {
    type Err = ParseEntityTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "polymer" => Ok(EntityType::Polymer),
            "non-polymer" | "nonpolymer" => Ok(EntityType::NonPolymer),
            "water" => Ok(EntityType::Water),
            _ => Err(ParseEntityTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntityType::Polymer => "polymer",
                EntityType::NonPolymer => "non-polymer",
                EntityType::Water => "water",
            }
        )
    }
}

/// A chemical identity shared by one or more chains.
///
/// Chains are referenced by their global index (traversal order across all
/// models); the entity never owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub chain_indices: Vec<usize>,
    pub sequence: String,
    pub description: String,
    pub entity_type: EntityType,
}

impl Entity {
    pub fn contains_chain(&self, chain_index: usize) -> bool {
        self.chain_indices.contains(&chain_index)
    }

    pub fn is_polymer(&self) -> bool {
        self.entity_type == EntityType::Polymer
    }
}
