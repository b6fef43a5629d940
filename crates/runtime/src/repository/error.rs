//! Error types raised by repository implementations.

use std::path::PathBuf;

use thiserror::Error;

/// Infrastructure failures surfaced by meal repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("meal repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid schema template {}: {reason}", path.display())]
    SchemaTemplate { path: PathBuf, reason: String },
}
