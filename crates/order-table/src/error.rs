//! Table Error Types

use thiserror::Error;

/// Errors raised while building or reading a table
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Column required by the caller is not in the table
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Column name appears twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column length differs from the table's row count
    #[error("Column {name} has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Cell holds something that is not a scalar
    #[error("Unsupported {kind} value in column {column} at row {row}")]
    UnsupportedValue {
        column: String,
        row: usize,
        kind: &'static str,
    },

    /// Input could not be read as records
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::InvalidFormat(err.to_string())
    }
}
