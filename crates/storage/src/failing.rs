use async_trait::async_trait;
use serde_json::Value;

use crate::{
    Result, StorageError, StorageKey,
    reader::{StorageMap, StorageReader},
};

/// Backend whose every read rejects with a fixed message.
///
/// Stands in for an unavailable store, e.g. a locked keychain.
#[derive(Debug, Clone)]
pub struct FailingStorage {
    message: String,
}

impl FailingStorage {
    /// Creates a backend that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingStorage {
    fn default() -> Self {
        Self::new("storage unavailable")
    }
}

#[async_trait]
impl StorageReader for FailingStorage {
    async fn read(&self, key: &StorageKey) -> Result<Option<Value>> {
        tracing::debug!(key = %key, "rejecting read");
        Err(StorageError::Backend(self.message.clone()))
    }

    async fn read_all(&self) -> Result<StorageMap> {
        Err(StorageError::Backend(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_read_rejects() {
        let storage = FailingStorage::new("keychain locked");

        let err = storage.read(&StorageKey::new("any")).await.unwrap_err();
        assert_eq!(err.to_string(), "Backend error: keychain locked");
        assert!(storage.read_all().await.is_err());
    }
}
