//! Inspector error types.

use common::StorageKey;
use inspector::{ClipboardError, ViewError};
use thiserror::Error;

/// Errors that end an inspection run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The view tree could not be built.
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// The requested copy could not be performed.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// `COPY_KEY` named a key with no rendered row.
    #[error("No row rendered for key {0}")]
    RowNotFound(StorageKey),
}

/// Result type for inspection runs.
pub type Result<T> = std::result::Result<T, CliError>;
