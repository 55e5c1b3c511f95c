//! Error types for entrant pool validation

use thiserror::Error;

/// Validation failure raised while building an [`EntrantPool`](crate::EntrantPool).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    /// An entrant has an empty or blank id.
    #[error("Entrant at position {position} has an empty id")]
    EmptyId { position: usize },

    /// Two entrants share the same id.
    #[error("Duplicate entrant id: {0}")]
    DuplicateId(String),

    /// A numeric field holds NaN or an infinity.
    #[error("Entrant {id}: field `{field}` is not finite")]
    NonFinite { id: String, field: &'static str },

    /// `max_exposure` lies outside (0, 1].
    #[error("Entrant {id}: max_exposure {value} is outside (0, 1]")]
    InvalidExposure { id: String, value: f64 },

    /// An outcome probability lies outside [0, 1].
    #[error("Entrant {id}: {field} {value} is outside [0, 1]")]
    InvalidProbability {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// Result type alias for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;
