//! Error types for a full optimizer run.

use std::io;
use std::path::PathBuf;

use lineupforge_config::ConfigError;
use lineupforge_io::LoadError;
use thiserror::Error;

/// Any failure that stops a run.
///
/// Infeasible constraints are not errors: they produce an empty lineup file.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entrant file could not be turned into a pool
    #[error("Input error: {0}")]
    Load(#[from] LoadError),

    /// Lineup file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for optimizer runs.
pub type Result<T> = std::result::Result<T, ForgeError>;
