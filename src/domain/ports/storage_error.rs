//! Storage port errors
//!
//! Shared by the domain repository and code store ports so the application
//! layer can map backend failures onto the user-facing taxonomy in one place.

use thiserror::Error;

/// Result type for storage port operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached or read
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A write was attempted and rejected
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Stored data could not be decoded
    #[error("stored data corrupted at {location}: {message}")]
    Corrupted { location: String, message: String },

    /// Nothing stored under the given key
    #[error("no records for {0}")]
    NotFound(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            _ => StorageError::Unavailable(err.to_string()),
        }
    }
}
