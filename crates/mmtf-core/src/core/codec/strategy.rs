use super::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of values a decoded column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Float,
    Char,
    Str,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ColumnKind::Int => "integer",
                ColumnKind::Float => "float",
                ColumnKind::Char => "character",
                ColumnKind::Str => "string",
            }
        )
    }
}

/// Width in bytes of one stored payload element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Storage {
    I8,
    I16,
    I32,
    F32,
    /// Fixed-width byte strings; the width is the strategy parameter.
    FixedBytes,
}

impl Storage {
    pub(crate) fn width(self) -> usize {
        match self {
            Storage::I8 => 1,
            Storage::I16 => 2,
            Storage::I32 | Storage::F32 => 4,
            Storage::FixedBytes => 1,
        }
    }
}

/// An encoding strategy, identified on the wire by its numeric code.
///
/// Each strategy fixes the storage width of the payload and the chain of
/// integer transforms applied between the stored values and the decoded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum Strategy {
    Float32 = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    FixedString = 5,
    RunLengthChar = 6,
    RunLength = 7,
    RunLengthDelta = 8,
    RunLengthScaled = 9,
    DeltaRecursiveScaled16 = 10,
    Scaled16 = 11,
    RecursiveScaled16 = 12,
    RecursiveScaled8 = 13,
    Recursive16 = 14,
    Recursive8 = 15,
}

impl Strategy {
    pub const ALL: [Strategy; 15] = [
        Strategy::Float32,
        Strategy::Int8,
        Strategy::Int16,
        Strategy::Int32,
        Strategy::FixedString,
        Strategy::RunLengthChar,
        Strategy::RunLength,
        Strategy::RunLengthDelta,
        Strategy::RunLengthScaled,
        Strategy::DeltaRecursiveScaled16,
        Strategy::Scaled16,
        Strategy::RecursiveScaled16,
        Strategy::RecursiveScaled8,
        Strategy::Recursive16,
        Strategy::Recursive8,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.code() == code)
            .ok_or(CodecError::UnknownStrategy(code))
    }

    pub fn column_kind(self) -> ColumnKind {
        match self {
            Strategy::Int8
            | Strategy::Int16
            | Strategy::Int32
            | Strategy::RunLength
            | Strategy::RunLengthDelta
            | Strategy::Recursive16
            | Strategy::Recursive8 => ColumnKind::Int,
            Strategy::Float32
            | Strategy::RunLengthScaled
            | Strategy::DeltaRecursiveScaled16
            | Strategy::Scaled16
            | Strategy::RecursiveScaled16
            | Strategy::RecursiveScaled8 => ColumnKind::Float,
            Strategy::RunLengthChar => ColumnKind::Char,
            Strategy::FixedString => ColumnKind::Str,
        }
    }

    pub(crate) fn storage(self) -> Storage {
        match self {
            Strategy::Float32 => Storage::F32,
            Strategy::Int8 | Strategy::RecursiveScaled8 | Strategy::Recursive8 => Storage::I8,
            Strategy::Int16
            | Strategy::DeltaRecursiveScaled16
            | Strategy::Scaled16
            | Strategy::RecursiveScaled16
            | Strategy::Recursive16 => Storage::I16,
            Strategy::Int32
            | Strategy::RunLengthChar
            | Strategy::RunLength
            | Strategy::RunLengthDelta
            | Strategy::RunLengthScaled => Storage::I32,
            Strategy::FixedString => Storage::FixedBytes,
        }
    }

    /// Whether the parameter is a divisor applied to scaled integers.
    pub fn is_scaled(self) -> bool {
        matches!(
            self,
            Strategy::RunLengthScaled
                | Strategy::DeltaRecursiveScaled16
                | Strategy::Scaled16
                | Strategy::RecursiveScaled16
                | Strategy::RecursiveScaled8
        )
    }
}

impl TryFrom<i32> for Strategy {
    type Error = CodecError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<Strategy> for i32 {
    fn from(strategy: Strategy) -> Self {
        strategy.code()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
