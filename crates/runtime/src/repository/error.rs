//! Error types raised by snapshot persistence.

use thiserror::Error;

/// Errors surfaced while encoding, decoding or storing snapshots.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid snapshot name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
