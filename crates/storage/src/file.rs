use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    Result, StorageError, StorageKey,
    reader::{StorageMap, StorageReader},
};

/// Storage backend reading a JSON object document from disk.
///
/// The document is re-read on every call; nothing is cached between reads.
/// A missing file reads as an empty storage.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a backend for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StorageMap> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "storage file missing, reading as empty");
                return Ok(StorageMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(entries) => Ok(entries),
            other => Err(StorageError::InvalidDocument(format!(
                "expected a JSON object in {}, found {}",
                self.path.display(),
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl StorageReader for JsonFileStorage {
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    async fn read(&self, key: &StorageKey) -> Result<Option<Value>> {
        metrics::counter!("storage_reads_total").increment(1);
        let mut entries = self.load().await?;
        Ok(entries.shift_remove(key.as_str()))
    }

    #[tracing::instrument(skip(self))]
    async fn read_all(&self) -> Result<StorageMap> {
        metrics::counter!("storage_read_all_total").increment(1);
        self.load().await
    }
}
