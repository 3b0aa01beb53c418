use super::strategy::{ColumnKind, Strategy};
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown column name: '{0}'")]
    UnknownColumn(String),

    #[error(
        "Strategy {strategy} produces {found} values but column '{column}' holds {expected} values"
    )]
    IncompatibleStrategy {
        column: ColumnField,
        strategy: Strategy,
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("Column '{column}' requires a positive parameter for strategy {strategy} (found {parameter})")]
    InvalidParameter {
        column: ColumnField,
        strategy: Strategy,
        parameter: i32,
    },
}

/// Strategy and parameter used to encode one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEncoding {
    pub strategy: Strategy,
    pub parameter: i32,
}

impl ColumnEncoding {
    pub const fn new(strategy: Strategy, parameter: i32) -> Self {
        Self {
            strategy,
            parameter,
        }
    }
}

/// The binary-encoded columns of a structure payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnField {
    XCoord,
    YCoord,
    ZCoord,
    BFactor,
    Occupancy,
    AtomId,
    AltLoc,
    InsCode,
    GroupId,
    GroupType,
    SecStruct,
    SequenceIndex,
    ChainId,
    ChainName,
    BondAtom,
    BondOrder,
}

static COLUMN_NAMES: Map<&'static str, ColumnField> = phf_map! {
    "x-coord" => ColumnField::XCoord,
    "y-coord" => ColumnField::YCoord,
    "z-coord" => ColumnField::ZCoord,
    "b-factor" => ColumnField::BFactor,
    "occupancy" => ColumnField::Occupancy,
    "atom-id" => ColumnField::AtomId,
    "alt-loc" => ColumnField::AltLoc,
    "ins-code" => ColumnField::InsCode,
    "group-id" => ColumnField::GroupId,
    "group-type" => ColumnField::GroupType,
    "sec-struct" => ColumnField::SecStruct,
    "sequence-index" => ColumnField::SequenceIndex,
    "chain-id" => ColumnField::ChainId,
    "chain-name" => ColumnField::ChainName,
    "bond-atom" => ColumnField::BondAtom,
    "bond-order" => ColumnField::BondOrder,
};

impl ColumnField {
    pub const ALL: [ColumnField; 16] = [
        ColumnField::XCoord,
        ColumnField::YCoord,
        ColumnField::ZCoord,
        ColumnField::BFactor,
        ColumnField::Occupancy,
        ColumnField::AtomId,
        ColumnField::AltLoc,
        ColumnField::InsCode,
        ColumnField::GroupId,
        ColumnField::GroupType,
        ColumnField::SecStruct,
        ColumnField::SequenceIndex,
        ColumnField::ChainId,
        ColumnField::ChainName,
        ColumnField::BondAtom,
        ColumnField::BondOrder,
    ];

    pub fn kind(self) -> ColumnKind {
        match self {
            ColumnField::XCoord
            | ColumnField::YCoord
            | ColumnField::ZCoord
            | ColumnField::BFactor
            | ColumnField::Occupancy => ColumnKind::Float,
            ColumnField::AltLoc | ColumnField::InsCode => ColumnKind::Char,
            ColumnField::ChainId | ColumnField::ChainName => ColumnKind::Str,
            _ => ColumnKind::Int,
        }
    }

    /// The container key this column is stored under.
    pub fn key(self) -> &'static str {
        match self {
            ColumnField::XCoord => "xCoordList",
            ColumnField::YCoord => "yCoordList",
            ColumnField::ZCoord => "zCoordList",
            ColumnField::BFactor => "bFactorList",
            ColumnField::Occupancy => "occupancyList",
            ColumnField::AtomId => "atomIdList",
            ColumnField::AltLoc => "altLocList",
            ColumnField::InsCode => "insCodeList",
            ColumnField::GroupId => "groupIdList",
            ColumnField::GroupType => "groupTypeList",
            ColumnField::SecStruct => "secStructList",
            ColumnField::SequenceIndex => "sequenceIndexList",
            ColumnField::ChainId => "chainIdList",
            ColumnField::ChainName => "chainNameList",
            ColumnField::BondAtom => "bondAtomList",
            ColumnField::BondOrder => "bondOrderList",
        }
    }

    /// Kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        COLUMN_NAMES
            .entries()
            .find(|(_, field)| **field == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Default encoding, with the scale factors documented per column:
    /// coordinates 1/1000 Å, B-factors 1/100, occupancies 1/100.
    pub fn default_encoding(self) -> ColumnEncoding {
        match self {
            ColumnField::XCoord | ColumnField::YCoord | ColumnField::ZCoord => {
                ColumnEncoding::new(Strategy::DeltaRecursiveScaled16, 1000)
            }
            ColumnField::BFactor => ColumnEncoding::new(Strategy::DeltaRecursiveScaled16, 100),
            ColumnField::Occupancy => ColumnEncoding::new(Strategy::RunLengthScaled, 100),
            ColumnField::AtomId | ColumnField::GroupId | ColumnField::SequenceIndex => {
                ColumnEncoding::new(Strategy::RunLengthDelta, 0)
            }
            ColumnField::AltLoc | ColumnField::InsCode => {
                ColumnEncoding::new(Strategy::RunLengthChar, 0)
            }
            ColumnField::GroupType | ColumnField::BondAtom => {
                ColumnEncoding::new(Strategy::Int32, 0)
            }
            ColumnField::SecStruct | ColumnField::BondOrder => {
                ColumnEncoding::new(Strategy::Int8, 0)
            }
            ColumnField::ChainId | ColumnField::ChainName => {
                ColumnEncoding::new(Strategy::FixedString, 4)
            }
        }
    }
}

impl FromStr for ColumnField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLUMN_NAMES
            .get(s.trim().to_lowercase().replace('_', "-").as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-column encodings used when serializing a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingConfig {
    encodings: [ColumnEncoding; 16],
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            encodings: ColumnField::ALL.map(ColumnField::default_encoding),
        }
    }
}

impl EncodingConfig {
    pub fn get(&self, field: ColumnField) -> ColumnEncoding {
        self.encodings[field as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnField, ColumnEncoding)> + '_ {
        ColumnField::ALL.iter().map(|&f| (f, self.get(f)))
    }
}

#[derive(Default)]
pub struct EncodingConfigBuilder {
    overrides: Vec<(ColumnField, ColumnEncoding)>,
}

impl EncodingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, field: ColumnField, encoding: ColumnEncoding) -> Self {
        self.overrides.push((field, encoding));
        self
    }

    pub fn build(self) -> Result<EncodingConfig, ConfigError> {
        let mut config = EncodingConfig::default();
        for (field, encoding) in self.overrides {
            validate(field, encoding)?;
            config.encodings[field as usize] = encoding;
        }
        Ok(config)
    }
}

fn validate(field: ColumnField, encoding: ColumnEncoding) -> Result<(), ConfigError> {
    let found = encoding.strategy.column_kind();
    if found != field.kind() {
        return Err(ConfigError::IncompatibleStrategy {
            column: field,
            strategy: encoding.strategy,
            expected: field.kind(),
            found,
        });
    }
    let needs_positive = encoding.strategy.is_scaled() || encoding.strategy == Strategy::FixedString;
    if needs_positive && encoding.parameter <= 0 {
        return Err(ConfigError::InvalidParameter {
            column: field,
            strategy: encoding.strategy,
            parameter: encoding.parameter,
        });
    }
    Ok(())
}
