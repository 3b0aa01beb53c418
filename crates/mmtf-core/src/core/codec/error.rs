use super::strategy::ColumnKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unknown encoding strategy code: {0}")]
    UnknownStrategy(i32),

    #[error("Encoded array header requires 12 bytes, found {0}")]
    TruncatedHeader(usize),

    #[error("Payload of {len} bytes is not a multiple of the {width}-byte element width")]
    MisalignedPayload { len: usize, width: usize },

    #[error("Decoded {found} elements but the header declares {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Run-length payload must hold (value, count) pairs, found {0} values")]
    OddRunLength(usize),

    #[error("Declared element count {count} exceeds the limit of {limit}")]
    ElementCountTooLarge { count: usize, limit: usize },

    #[error("Cannot allocate {0} decoded elements")]
    AllocationFailed(usize),

    #[error("Recursive index payload ends inside a spilled value")]
    DanglingRecursiveChunk,

    #[error("Run-length count must not be negative (found {0})")]
    NegativeRunCount(i32),

    #[error("Integer overflow while reconstructing values ({0})")]
    Overflow(&'static str),

    #[error("Scale parameter must be positive for strategy {strategy} (found {parameter})")]
    InvalidScale { strategy: i32, parameter: i32 },

    #[error("String width must be positive for strategy 5 (found {0})")]
    InvalidStringWidth(i32),

    #[error("String '{value}' does not fit the fixed width of {width} bytes")]
    StringTooLong { value: String, width: usize },

    #[error("Value {value} does not fit a {bits}-bit signed integer")]
    ValueOutOfRange { value: i64, bits: u32 },

    #[error("Strategy {strategy} produces {expected} columns but a {found} column was given")]
    ColumnTypeMismatch {
        strategy: i32,
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("Expected a {expected} column but decoded a {found} column")]
    UnexpectedColumn {
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("Declared element count must not be negative (found {0})")]
    NegativeLength(i32),

    #[error("Invalid UTF-8 in fixed-width string data")]
    InvalidUtf8,

    #[error("Code point {0} is not a valid character")]
    InvalidChar(i32),
}
