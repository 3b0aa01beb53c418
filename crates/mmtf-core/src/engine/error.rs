use crate::core::codec::ConfigError;
use crate::core::columns::ColumnError;
use crate::core::io::msgpack::ContainerError;
use thiserror::Error;

/// A call arrived in a state that does not permit it. Poisons the assembler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("'{0}' called before init_structure")]
    NotInitialized(&'static str),

    #[error("init_structure called twice")]
    AlreadyInitialized,

    #[error("Out-of-order model: expected model {expected}, found {found}")]
    OutOfOrderModel { expected: usize, found: usize },

    #[error("Chain '{0}' added with no open model")]
    NoOpenModel(String),

    #[error("Group '{0}' added with no open chain in the current model")]
    NoOpenChain(String),

    #[error("'{0}' called with no open group")]
    NoOpenGroup(&'static str),

    #[error("Crystal info set more than once")]
    DuplicateCrystalInfo,

    #[error("Header info set more than once")]
    DuplicateHeaderInfo,

    #[error("Assembler aborted by an earlier protocol error")]
    Aborted,
}

/// Declared counts or cross-references do not reconcile.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Declared {level} total is {declared} but {found} were added")]
    TotalMismatch {
        level: &'static str,
        declared: usize,
        found: usize,
    },

    #[error("Chain count mismatch for model {model}: declared {declared}, found {found}")]
    ChainCountMismatch {
        model: usize,
        declared: usize,
        found: usize,
    },

    #[error("Group count mismatch for chain {chain}: declared {declared}, found {found}")]
    GroupCountMismatch {
        chain: usize,
        declared: usize,
        found: usize,
    },

    #[error("Atom count mismatch for group {group}: declared {declared}, found {found}")]
    AtomCountMismatch {
        group: usize,
        declared: usize,
        found: usize,
    },

    #[error("Bond count mismatch for group {group}: declared {declared}, found {found}")]
    BondCountMismatch {
        group: usize,
        declared: usize,
        found: usize,
    },

    #[error(
        "Bond {bond} of group {group} references local atom {atom} but the group has {atom_count} atoms"
    )]
    GroupBondOutOfBounds {
        group: usize,
        bond: usize,
        atom: usize,
        atom_count: usize,
    },

    #[error("Inter-group bond {bond} references atom {atom} but the structure has {atom_count} atoms")]
    InterGroupBondOutOfBounds {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },

    #[error("Bond {bond} of group {group} has invalid bond order {order}")]
    InvalidGroupBondOrder { group: usize, bond: usize, order: i32 },

    #[error("Inter-group bond {bond} has invalid bond order {order}")]
    InvalidInterGroupBondOrder { bond: usize, order: i32 },

    #[error("Group {group} has unknown secondary structure code {code}")]
    InvalidSecondaryStructure { group: usize, code: i32 },

    #[error("Group {group} has invalid sequence index {index}")]
    InvalidSequenceIndex { group: usize, index: i32 },

    #[error("Entity {entity} references chain {chain} but the structure has {chain_count} chains")]
    EntityChainOutOfBounds {
        entity: usize,
        chain: usize,
        chain_count: usize,
    },

    #[error("Chain {chain} is claimed by both entity {first} and entity {second}")]
    OverlappingEntities {
        chain: usize,
        first: usize,
        second: usize,
    },

    #[error("Entity {entity} has unknown type '{entity_type}'")]
    UnknownEntityType { entity: usize, entity_type: String },

    #[error(
        "Bioassembly {bioassembly} references chain {chain} but the structure has {chain_count} chains"
    )]
    BioAssemblyChainOutOfBounds {
        bioassembly: usize,
        chain: usize,
        chain_count: usize,
    },

    #[error("Bioassembly {bioassembly} has a transform of {len} values (expected 12 or 16)")]
    InvalidTransform { bioassembly: usize, len: usize },

    #[error("Unit cell has {0} values (expected 6)")]
    InvalidUnitCell(usize),

    #[error("Malformed column '{column}': {reason}")]
    MalformedColumns { column: &'static str, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{what} value {value} does not fit a 32-bit integer column")]
    CountOverflow { what: &'static str, value: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Codec error: {source}")]
    Column {
        #[from]
        source: ColumnError,
    },

    #[error("Container error: {source}")]
    Container {
        #[from]
        source: ContainerError,
    },

    #[error("Assembly failed: {source}")]
    Assembly {
        #[from]
        source: AssemblyError,
    },

    #[error("Encoding failed: {source}")]
    Encode {
        #[from]
        source: EncodeError,
    },

    #[error("Invalid encoding configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProtocolError> for EngineError {
    fn from(e: ProtocolError) -> Self {
        AssemblyError::from(e).into()
    }
}

impl From<ValidationError> for EngineError {
    fn from(e: ValidationError) -> Self {
        AssemblyError::from(e).into()
    }
}
