//! The tri-state result of one storage read.

use storage::StorageError;

use crate::Node;

/// Why a read failed, kept for logging and inspection.
///
/// The cause is never rendered and never reaches a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    cause: String,
}

impl ReadFailure {
    /// Creates a failure with the given cause.
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// Returns the backend's description of what went wrong.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl std::fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.cause)
    }
}

impl From<&StorageError> for ReadFailure {
    fn from(err: &StorageError) -> Self {
        Self::new(err.to_string())
    }
}

/// Lifecycle of a single read issued by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadSnapshot<T> {
    /// The read has not settled yet.
    Pending,
    /// The read rejected.
    Failed(ReadFailure),
    /// The read settled with a value.
    Succeeded(T),
}

impl<T> ReadSnapshot<T> {
    /// Returns true while the read has not settled.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true once the read has either failed or succeeded.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Returns the failure, if the read rejected.
    pub fn failure(&self) -> Option<&ReadFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Maps a successful value, leaving other states untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadSnapshot<U> {
        match self {
            Self::Pending => ReadSnapshot::Pending,
            Self::Failed(failure) => ReadSnapshot::Failed(failure),
            Self::Succeeded(value) => ReadSnapshot::Succeeded(f(value)),
        }
    }
}

impl<T> From<storage::Result<T>> for ReadSnapshot<T> {
    fn from(result: storage::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(err) => Self::Failed(ReadFailure::from(&err)),
        }
    }
}

/// Renders a snapshot whose success value has already been presented.
pub fn render_snapshot(snapshot: &ReadSnapshot<Node>) -> Node {
    match snapshot {
        ReadSnapshot::Pending => Node::loading(),
        ReadSnapshot::Failed(_) => Node::failure(),
        ReadSnapshot::Succeeded(node) => node.clone(),
    }
}
