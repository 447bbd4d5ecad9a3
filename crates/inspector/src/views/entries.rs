//! Full-dump storage view.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use storage::{StorageKey, StorageReaderExt};

use crate::element::AsyncRead;
use crate::snapshot::ReadSnapshot;
use crate::views::ValueRow;
use crate::{BuildContext, Element, Node, Result, SharedReader, View};

/// Renders one entry of a full dump.
pub type EntryPresenter<T> = Arc<dyn Fn(&BuildContext, &StorageKey, T) -> Node + Send + Sync>;

/// Reads every entry and renders them as a list, in the backend's order.
///
/// Same lifecycle as [`StorageValueView`](crate::StorageValueView): one read
/// per build, loading and failure placeholders, presenter calls only on
/// success.
pub struct StorageEntriesView<T = Value> {
    reader: Option<SharedReader>,
    presenter: EntryPresenter<T>,
}

impl StorageEntriesView<Value> {
    /// Shows each entry as a [`ValueRow`] titled with its key.
    pub fn new() -> Self {
        Self::with_presenter(|_, key, value: Value| {
            ValueRow::for_value(key.as_str(), Some(&value)).into_node()
        })
    }
}

impl Default for StorageEntriesView<Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StorageEntriesView<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Reads every entry as `T` and renders each with `presenter`.
    pub fn with_presenter<F>(presenter: F) -> Self
    where
        F: Fn(&BuildContext, &StorageKey, T) -> Node + Send + Sync + 'static,
    {
        Self {
            reader: None,
            presenter: Arc::new(presenter),
        }
    }

    /// Reads from `reader` instead of the one published in the context.
    pub fn with_reader(mut self, reader: SharedReader) -> Self {
        self.reader = Some(reader);
        self
    }
}

impl<T> View for StorageEntriesView<T>
where
    T: DeserializeOwned + Send + 'static,
{
    #[tracing::instrument(skip_all)]
    fn build(&self, ctx: &BuildContext) -> Result<Element> {
        let reader = match &self.reader {
            Some(reader) => Arc::clone(reader),
            None => ctx.reader()?,
        };
        let presenter = Arc::clone(&self.presenter);
        let ctx = ctx.clone();

        let read = AsyncRead::spawn(
            "entries",
            async move { ReadSnapshot::from(reader.read_all_as::<T>().await) },
            move |entries: Vec<(StorageKey, T)>| {
                Node::List(
                    entries
                        .into_iter()
                        .map(|(key, value)| presenter(&ctx, &key, value))
                        .collect(),
                )
            },
        );
        Ok(Element::Async(read))
    }
}
