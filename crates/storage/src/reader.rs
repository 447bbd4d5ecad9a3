use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Result, StorageError, StorageKey};

/// Every key/value pair known to a backend.
///
/// Iteration yields entries in insertion order.
pub type StorageMap = serde_json::Map<String, Value>;

/// Core trait for storage backends the inspector can read from.
///
/// Values cross this boundary as JSON values; callers pick the concrete
/// type with [`StorageReaderExt::read_as`], which checks the conversion.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait StorageReader: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is not present. Absence is not an error.
    async fn read(&self, key: &StorageKey) -> Result<Option<Value>>;

    /// Reads every key/value pair currently known to the backend.
    async fn read_all(&self) -> Result<StorageMap>;
}

/// Extension trait providing typed reads on top of [`StorageReader`].
#[async_trait]
pub trait StorageReaderExt: StorageReader {
    /// Reads the value under `key` and converts it to `T`.
    ///
    /// Fails with [`StorageError::TypeMismatch`] if the stored value does not
    /// fit `T`.
    async fn read_as<T>(&self, key: &StorageKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.read(key).await? {
            Some(value) => decode(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Checks whether the backend holds a value under `key`.
    async fn contains(&self, key: &StorageKey) -> Result<bool> {
        Ok(self.read(key).await?.is_some())
    }

    /// Reads every entry and converts each value to `T`.
    ///
    /// Entries keep the backend's iteration order. The first value that does
    /// not fit `T` fails the whole read.
    async fn read_all_as<T>(&self) -> Result<Vec<(StorageKey, T)>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let entries = self.read_all().await?;
        entries
            .into_iter()
            .map(|(key, value)| {
                let key = StorageKey::new(key);
                let typed = decode(&key, value)?;
                Ok((key, typed))
            })
            .collect()
    }
}

// Blanket implementation for all StorageReader implementations
impl<R: StorageReader + ?Sized> StorageReaderExt for R {}

/// Converts a stored value to the requested type, naming the key on failure.
pub fn decode<T: DeserializeOwned>(key: &StorageKey, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| StorageError::TypeMismatch {
        key: key.clone(),
        expected: std::any::type_name::<T>(),
        source,
    })
}
