//! Command-line storage inspector.
//!
//! Publishes one storage backend at the root of a view tree, renders the
//! configured keys plus a full dump, and reports the tree before and after
//! the reads settle.

pub mod config;
pub mod error;

use std::sync::Arc;

use inspector::{
    BuildContext, Clipboard, Column, Node, ReadFailure, SharedReader, StorageEntriesView,
    StorageScope, StorageValueView, View,
};
use serde_json::json;
use storage::{InMemoryStorage, JsonFileStorage, StorageKey};

pub use config::Config;
pub use error::{CliError, Result};

/// Heading above the individually selected keys.
pub const SELECTED_HEADING: &str = "Selected keys";

/// Heading above the full dump.
pub const ENTRIES_HEADING: &str = "All entries";

/// Outcome of one inspection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The tree as rendered immediately after building.
    pub loading: Node,
    /// The tree once every read settled.
    pub loaded: Node,
    /// Text copied for `COPY_KEY`, if that row had a value.
    pub copied: Option<String>,
    /// Causes of every rejected read, for logging.
    pub failures: Vec<ReadFailure>,
}

/// Backend used when no storage file is configured.
pub fn demo_storage() -> InMemoryStorage {
    InMemoryStorage::from_pairs([
        ("first", json!("first value")),
        ("second", json!("second value")),
        ("session_token", json!("c2Vzc2lvbi10b2tlbg")),
        ("onboarding_complete", json!(true)),
        ("preferences", json!({"theme": "dark", "font_scale": 1.25})),
    ])
}

/// Builds the reader described by `config`.
pub fn reader_for(config: &Config) -> SharedReader {
    match &config.storage_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "inspecting storage file");
            Arc::new(JsonFileStorage::new(path.clone()))
        }
        None => {
            tracing::info!("inspecting built-in demo storage");
            Arc::new(demo_storage())
        }
    }
}

/// Builds the inspector view tree for `config` over `reader`.
pub fn inspector_view(config: &Config, reader: SharedReader) -> StorageScope {
    let mut column = Column::new();
    if !config.inspect_keys.is_empty() {
        column.push(Node::text(SELECTED_HEADING));
        for key in &config.inspect_keys {
            column.push(StorageValueView::new(key.clone()));
        }
    }
    column.push(Node::text(ENTRIES_HEADING));
    column.push(StorageEntriesView::new());

    StorageScope::shared(reader, column)
}

/// Runs one inspection: build, render, wait for the reads, render again.
#[tracing::instrument(skip_all)]
pub async fn inspect(
    config: &Config,
    reader: SharedReader,
    clipboard: &dyn Clipboard,
) -> Result<Report> {
    let element = inspector_view(config, reader).build(&BuildContext::root())?;
    let loading = element.render();

    element.settled().await;
    let loaded = element.render();
    let failures = element.failures();

    let copied = match &config.copy_key {
        Some(key) => copy_row(&loaded, key, clipboard)?,
        None => None,
    };

    Ok(Report {
        loading,
        loaded,
        copied,
        failures,
    })
}

/// Runs the copy action of the row titled `key`, returning the copied text.
fn copy_row(tree: &Node, key: &StorageKey, clipboard: &dyn Clipboard) -> Result<Option<String>> {
    let row = tree
        .find_row(key.as_str())
        .ok_or_else(|| CliError::RowNotFound(key.clone()))?;
    if !row.copy_to(clipboard)? {
        tracing::info!(key = %key, "row has no value to copy");
        return Ok(None);
    }

    tracing::info!(key = %key, "copied value to clipboard");
    match row {
        Node::Row { value, .. } => Ok(value.clone()),
        _ => Ok(None),
    }
}
