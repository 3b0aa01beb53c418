use mmtf::core::codec::{ColumnEncoding, ColumnField, Strategy};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid override '{0}'. Expected 'COLUMN=STRATEGY[:PARAMETER]' (e.g., 'x-coord=10:1000').")]
    InvalidFormat(String),

    #[error("Unknown column '{0}'.")]
    UnknownColumn(String),

    #[error("Invalid strategy '{0}'. Expected a strategy code between 1 and 15.")]
    InvalidStrategy(String),

    #[error("Invalid parameter '{0}'. Expected an integer.")]
    InvalidParameter(String),
}

/// A parsed `-S` column override. `parameter` is `None` when omitted, in which
/// case the column's default parameter is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOverride {
    pub column: ColumnField,
    pub strategy: Strategy,
    pub parameter: Option<i32>,
}

impl ColumnOverride {
    pub fn encoding(&self) -> ColumnEncoding {
        let parameter = self
            .parameter
            .unwrap_or_else(|| self.column.default_encoding().parameter);
        ColumnEncoding::new(self.strategy, parameter)
    }
}

pub fn parse_strategy(value: &str) -> Result<Strategy, ParseError> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(|code| Strategy::from_code(code).ok())
        .ok_or_else(|| ParseError::InvalidStrategy(value.to_string()))
}

pub fn parse_override(input: &str) -> Result<ColumnOverride, ParseError> {
    let (column, encoding) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidFormat(input.to_string()))?;
    if encoding.trim().is_empty() {
        return Err(ParseError::InvalidFormat(input.to_string()));
    }
    let column = column
        .parse::<ColumnField>()
        .map_err(|_| ParseError::UnknownColumn(column.to_string()))?;

    let (strategy, parameter) = match encoding.split_once(':') {
        Some((strategy, parameter)) => (strategy, Some(parameter)),
        None => (encoding, None),
    };
    let strategy = parse_strategy(strategy)?;
    let parameter = parameter
        .map(|p| {
            p.trim()
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidParameter(p.to_string()))
        })
        .transpose()?;

    Ok(ColumnOverride {
        column,
        strategy,
        parameter,
    })
}
