//! Preprocessing Error Types

use order_table::TableError;
use thiserror::Error;

/// Errors that abort a preprocessing call
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Hard-coded column (or `CLASS` when training) not in the input
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Order date that no known format accepts
    #[error("Unparseable date {value:?} in {column} at row {row}")]
    InvalidDate {
        column: &'static str,
        row: usize,
        value: String,
    },

    /// No time of day could be parsed, so there is no fill mean
    #[error("No parseable values in {0} to compute a fill mean")]
    NoTimeValues(&'static str),

    /// Category absent from the fitted vocabulary
    #[error("Unknown category {value:?} in {column} at row {row}")]
    UnknownCategory {
        column: String,
        row: usize,
        value: String,
    },

    /// Vocabulary has no entry for a column it should encode
    #[error("Vocabulary has no entry for column {0}")]
    VocabularyMismatch(String),

    /// Vocabulary bytes could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while saving or loading a vocabulary
    #[error("I/O error: {0}")]
    Io(String),

    /// Table construction error
    #[error(transparent)]
    Table(TableError),
}

impl From<TableError> for PreprocessError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn(name) => PreprocessError::MissingColumn(name),
            other => PreprocessError::Table(other),
        }
    }
}

impl From<postcard::Error> for PreprocessError {
    fn from(err: postcard::Error) -> Self {
        PreprocessError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PreprocessError {
    fn from(err: std::io::Error) -> Self {
        PreprocessError::Io(err.to_string())
    }
}
