use thiserror::Error;

use crate::StorageKey;

/// Errors that can occur when reading from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected the read for its own reasons.
    #[error("Backend error: {0}")]
    Backend(String),

    /// The stored value could not be converted to the type the caller asked for.
    #[error("Type mismatch for key {key}: expected {expected}")]
    TypeMismatch {
        key: StorageKey,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred while reaching the backing medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document does not have the expected shape.
    #[error("Invalid storage document: {0}")]
    InvalidDocument(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
