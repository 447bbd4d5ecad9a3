pub mod error;
pub mod failing;
pub mod file;
pub mod memory;
pub mod reader;

pub use common::StorageKey;
pub use error::{Result, StorageError};
pub use failing::FailingStorage;
pub use file::JsonFileStorage;
pub use memory::InMemoryStorage;
pub use reader::{StorageMap, StorageReader, StorageReaderExt};
pub use serde_json::Value;
