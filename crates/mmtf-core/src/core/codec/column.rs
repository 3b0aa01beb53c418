use super::error::CodecError;
use super::strategy::ColumnKind;

/// A decoded column: an ordered sequence of values of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i32>),
    Float(Vec<f32>),
    /// Characters; `None` marks an absent value (stored as code point 0).
    Char(Vec<Option<char>>),
    Str(Vec<String>),
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Int(_) => ColumnKind::Int,
            Column::Float(_) => ColumnKind::Float,
            Column::Char(_) => ColumnKind::Char,
            Column::Str(_) => ColumnKind::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Char(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_ints(self) -> Result<Vec<i32>, CodecError> {
        match self {
            Column::Int(v) => Ok(v),
            other => Err(other.mismatch(ColumnKind::Int)),
        }
    }

    pub fn into_floats(self) -> Result<Vec<f32>, CodecError> {
        match self {
            Column::Float(v) => Ok(v),
            other => Err(other.mismatch(ColumnKind::Float)),
        }
    }

    pub fn into_chars(self) -> Result<Vec<Option<char>>, CodecError> {
        match self {
            Column::Char(v) => Ok(v),
            other => Err(other.mismatch(ColumnKind::Char)),
        }
    }

    pub fn into_strings(self) -> Result<Vec<String>, CodecError> {
        match self {
            Column::Str(v) => Ok(v),
            other => Err(other.mismatch(ColumnKind::Str)),
        }
    }

    fn mismatch(&self, expected: ColumnKind) -> CodecError {
        CodecError::UnexpectedColumn {
            expected,
            found: self.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_kind_reflect_variant() {
        let column = Column::Char(vec![Some('A'), None]);
        assert_eq!(column.kind(), ColumnKind::Char);
        assert_eq!(column.len(), 2);
        assert!(!column.is_empty());
        assert!(Column::Str(Vec::new()).is_empty());
    }

    #[test]
    fn into_accessors_reject_other_kinds() {
        assert_eq!(Column::Int(vec![1, 2]).into_ints().unwrap(), vec![1, 2]);
        assert_eq!(
            Column::Int(vec![1]).into_floats(),
            Err(CodecError::UnexpectedColumn {
                expected: ColumnKind::Float,
                found: ColumnKind::Int,
            })
        );
    }
}
