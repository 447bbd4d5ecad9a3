//! Declarative views over a storage reader.

pub mod entries;
pub mod row;
pub mod value;

use std::sync::Arc;

use storage::StorageReader;

pub use entries::{EntryPresenter, StorageEntriesView};
pub use row::ValueRow;
pub use value::{StorageValueView, ValuePresenter};

use crate::{BuildContext, Element, Node, Result, SharedReader};

/// Something that can be built into an [`Element`] within a context.
///
/// Building may spawn reads, so it must happen inside a Tokio runtime.
pub trait View: Send + Sync {
    /// Builds this view. Each call starts fresh reads.
    fn build(&self, ctx: &BuildContext) -> Result<Element>;
}

impl View for Node {
    fn build(&self, _ctx: &BuildContext) -> Result<Element> {
        Ok(Element::Static(self.clone()))
    }
}

impl<V: View + ?Sized> View for Box<V> {
    fn build(&self, ctx: &BuildContext) -> Result<Element> {
        (**self).build(ctx)
    }
}

/// Publishes a reader to every view built beneath it.
///
/// A scope nested inside another shadows the outer reader for its subtree.
pub struct StorageScope {
    reader: SharedReader,
    child: Box<dyn View>,
}

impl StorageScope {
    /// Wraps `child` so it and its descendants resolve `reader`.
    pub fn new(reader: impl StorageReader + 'static, child: impl View + 'static) -> Self {
        Self::shared(Arc::new(reader), child)
    }

    /// Like [`new`](Self::new) for a reader that is already shared.
    pub fn shared(reader: SharedReader, child: impl View + 'static) -> Self {
        Self {
            reader,
            child: Box::new(child),
        }
    }
}

impl View for StorageScope {
    fn build(&self, ctx: &BuildContext) -> Result<Element> {
        self.child.build(&ctx.with_reader(Arc::clone(&self.reader)))
    }
}

/// Builds its children in order and renders them as a list.
#[derive(Default)]
pub struct Column {
    children: Vec<Box<dyn View>>,
}

impl Column {
    /// Creates an empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child view.
    pub fn child(mut self, view: impl View + 'static) -> Self {
        self.children.push(Box::new(view));
        self
    }

    /// Appends a child view in place.
    pub fn push(&mut self, view: impl View + 'static) {
        self.children.push(Box::new(view));
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if the column has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl View for Column {
    fn build(&self, ctx: &BuildContext) -> Result<Element> {
        let children = self
            .children
            .iter()
            .map(|child| child.build(ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Element::Group(children))
    }
}
