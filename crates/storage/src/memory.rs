use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    Result, StorageKey,
    reader::{StorageMap, StorageReader},
};

/// In-memory storage backend.
///
/// Keeps entries in insertion order. Clones share the same entries, so a
/// test can hand one clone to the inspector and mutate through another.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<StorageMap>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given pairs, in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<StorageKey>,
        V: Into<Value>,
    {
        let entries: StorageMap = pairs
            .into_iter()
            .map(|(key, value)| (key.into().into_inner(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Stores `value` under `key`, returning the previous value if any.
    ///
    /// Replacing an existing key keeps its original position.
    pub async fn insert(&self, key: impl Into<StorageKey>, value: impl Into<Value>) -> Option<Value> {
        self.entries
            .write()
            .await
            .insert(key.into().into_inner(), value.into())
    }

    /// Removes the value under `key`, preserving the order of the rest.
    pub async fn remove(&self, key: &StorageKey) -> Option<Value> {
        self.entries.write().await.shift_remove(key.as_str())
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StorageReader for InMemoryStorage {
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    async fn read(&self, key: &StorageKey) -> Result<Option<Value>> {
        metrics::counter!("storage_reads_total").increment(1);
        let entries = self.entries.read().await;
        Ok(entries.get(key.as_str()).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn read_all(&self) -> Result<StorageMap> {
        metrics::counter!("storage_read_all_total").increment(1);
        Ok(self.entries.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StorageError, StorageReaderExt};
    use serde_json::json;

    fn sample() -> InMemoryStorage {
        InMemoryStorage::from_pairs([("first", "first value"), ("second", "second value")])
    }

    #[tokio::test]
    async fn read_present_key() {
        let storage = sample();
        let value = storage.read(&StorageKey::new("first")).await.unwrap();
        assert_eq!(value, Some(json!("first value")));
    }

    #[tokio::test]
    async fn read_absent_key_is_none() {
        let storage = sample();
        let value = storage.read(&StorageKey::new("missing")).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn read_all_returns_exact_contents() {
        let storage = sample();
        let all = storage.read_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get("first"), Some(&json!("first value")));
        assert_eq!(all.get("second"), Some(&json!("second value")));
    }

    #[tokio::test]
    async fn read_all_keeps_insertion_order() {
        let storage = InMemoryStorage::new();
        storage.insert("zeta", 1).await;
        storage.insert("alpha", 2).await;
        storage.insert("mid", 3).await;

        let keys: Vec<_> = storage.read_all().await.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn remove_preserves_order_of_remaining() {
        let storage = InMemoryStorage::from_pairs([("a", 1), ("b", 2), ("c", 3)]);
        let removed = storage.remove(&StorageKey::new("a")).await;
        assert_eq!(removed, Some(json!(1)));

        let keys: Vec<_> = storage.read_all().await.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let storage = InMemoryStorage::new();
        let handle = storage.clone();
        handle.insert("token", "abc").await;

        assert_eq!(storage.len().await, 1);
        storage.clear().await;
        assert!(handle.is_empty().await);
    }

    #[tokio::test]
    async fn read_as_converts_and_checks() {
        let storage = InMemoryStorage::from_pairs([("count", json!(3)), ("name", json!("x"))]);

        let count: Option<u32> = storage.read_as(&StorageKey::new("count")).await.unwrap();
        assert_eq!(count, Some(3));

        let result = storage.read_as::<u32>(&StorageKey::new("name")).await;
        assert!(matches!(result, Err(StorageError::TypeMismatch { .. })));

        let missing: Option<u32> = storage.read_as(&StorageKey::new("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn contains_reflects_presence() {
        let storage = sample();
        assert!(storage.contains(&StorageKey::new("first")).await.unwrap());
        assert!(!storage.contains(&StorageKey::new("third")).await.unwrap());
    }

    #[tokio::test]
    async fn read_all_as_typed_entries() {
        let storage = sample();
        let entries: Vec<(StorageKey, String)> = storage.read_all_as().await.unwrap();
        assert_eq!(
            entries,
            vec![
                (StorageKey::new("first"), "first value".to_string()),
                (StorageKey::new("second"), "second value".to_string()),
            ]
        );
    }
}
