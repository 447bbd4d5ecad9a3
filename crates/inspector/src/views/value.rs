//! Single-key storage view.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use storage::{StorageKey, StorageReaderExt};

use crate::element::AsyncRead;
use crate::snapshot::ReadSnapshot;
use crate::views::ValueRow;
use crate::{BuildContext, Element, Node, Result, SharedReader, View};

/// Renders the value read for one key.
///
/// Called once per successful read with `None` when the key is absent.
pub type ValuePresenter<T> = Arc<dyn Fn(&BuildContext, Option<T>) -> Node + Send + Sync>;

/// Reads one key and renders it through a presenter.
///
/// Every build issues a fresh read; nothing is cached between builds. While
/// the read is in flight the element renders a loading placeholder, and a
/// rejected read (including a value that does not fit `T`) renders the
/// failure placeholder without calling the presenter.
pub struct StorageValueView<T = Value> {
    key: StorageKey,
    reader: Option<SharedReader>,
    presenter: ValuePresenter<T>,
}

impl StorageValueView<Value> {
    /// Reads `key` and shows it as a [`ValueRow`] titled with the key.
    pub fn new(key: impl Into<StorageKey>) -> Self {
        let key = key.into();
        let title = key.to_string();
        Self::with_presenter(key, move |_, value: Option<Value>| {
            ValueRow::for_value(title.clone(), value.as_ref()).into_node()
        })
    }
}

impl<T> StorageValueView<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Reads `key` as `T` and renders it with `presenter`.
    pub fn with_presenter<F>(key: impl Into<StorageKey>, presenter: F) -> Self
    where
        F: Fn(&BuildContext, Option<T>) -> Node + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            reader: None,
            presenter: Arc::new(presenter),
        }
    }

    /// Reads from `reader` instead of the one published in the context.
    pub fn with_reader(mut self, reader: SharedReader) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Returns the key this view reads.
    pub fn key(&self) -> &StorageKey {
        &self.key
    }
}

impl<T> View for StorageValueView<T>
where
    T: DeserializeOwned + Send + 'static,
{
    #[tracing::instrument(skip(self, ctx), fields(key = %self.key))]
    fn build(&self, ctx: &BuildContext) -> Result<Element> {
        let reader = match &self.reader {
            Some(reader) => Arc::clone(reader),
            None => ctx.reader()?,
        };
        let key = self.key.clone();
        let presenter = Arc::clone(&self.presenter);
        let ctx = ctx.clone();

        let read = AsyncRead::spawn(
            format!("value:{key}"),
            async move { ReadSnapshot::from(reader.read_as::<T>(&key).await) },
            move |value: Option<T>| presenter(&ctx, value),
        );
        Ok(Element::Async(read))
    }
}
