pub mod types;

pub use types::StorageKey;
