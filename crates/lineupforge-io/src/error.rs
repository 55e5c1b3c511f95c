//! Loader error type.

use std::path::PathBuf;

use lineupforge_core::PoolError;
use thiserror::Error;

/// Fatal input failure. Raised before any enumeration starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input has no header line")]
    Empty,

    #[error("Missing required column `{0}`")]
    MissingColumn(String),

    #[error("Line {line}: field `{field}` is required but empty")]
    MissingValue { line: usize, field: String },

    #[error("Line {line}: field `{field}` value {value:?} is not numeric")]
    NotNumeric {
        line: usize,
        field: String,
        value: String,
    },

    #[error("Line {line}: salary {value} is not a whole number in range")]
    InvalidSalary { line: usize, value: f64 },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error(transparent)]
    Pool(#[from] PoolError),
}
