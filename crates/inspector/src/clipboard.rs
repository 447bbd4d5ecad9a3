//! System clipboard seam.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors reported by a clipboard implementation.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The clipboard could not be written.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for a row's copy action.
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps everything copied to it in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently copied text.
    pub fn last(&self) -> Option<String> {
        self.history().pop()
    }

    /// Returns everything copied so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.copied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        // Pushes are atomic, so a poisoned history is still consistent.
        let mut copied = self.copied.lock().unwrap_or_else(PoisonError::into_inner);
        copied.push(text.to_string());
        tracing::debug!(len = text.len(), "copied text to clipboard");
        Ok(())
    }
}
