//! Context-scoped views over a storage backend.
//!
//! This crate binds a [`StorageReader`](storage::StorageReader) to a tree of
//! declarative views:
//! - [`BuildContext`] carries scoped providers; the nearest published reader wins
//! - [`StorageScope`] publishes a reader to everything built beneath it
//! - [`StorageValueView`] and [`StorageEntriesView`] issue one read per build and
//!   render the [`ReadSnapshot`] state machine through a presenter
//! - [`ValueRow`] is the default titled row with a copy action

pub mod clipboard;
pub mod context;
pub mod element;
pub mod error;
pub mod node;
pub mod snapshot;
pub mod views;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use context::{BuildContext, SharedReader};
pub use element::{AsyncRead, Element};
pub use error::{Result, ViewError};
pub use node::{Node, Style};
pub use snapshot::{ReadFailure, ReadSnapshot, render_snapshot};
pub use views::{
    Column, EntryPresenter, StorageEntriesView, StorageScope, StorageValueView, ValuePresenter,
    ValueRow, View,
};
