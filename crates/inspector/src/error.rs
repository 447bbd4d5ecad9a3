//! View error types.

use thiserror::Error;

/// Errors that can occur while building views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A view looked up a provider that no enclosing scope published.
    ///
    /// This is a wiring mistake in the view tree, not a runtime condition.
    #[error("No {0} was published in an enclosing scope")]
    MissingProvider(&'static str),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
