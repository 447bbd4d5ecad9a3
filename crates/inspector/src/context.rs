//! Scoped provider lookup for view trees.

use std::any::{Any, TypeId};
use std::sync::Arc;

use storage::StorageReader;

use crate::{Result, ViewError};

/// A reader shared by every view beneath the scope that published it.
pub type SharedReader = Arc<dyn StorageReader>;

struct Frame {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Frame>>,
}

/// Ambient values visible to a view while it builds.
///
/// Each [`provide`](Self::provide) returns a child context with one more
/// frame; the parent is left untouched. Lookups walk frames from the
/// innermost outward, so a value provided deeper shadows one provided by an
/// ancestor for the same type.
#[derive(Clone, Default)]
pub struct BuildContext {
    head: Option<Arc<Frame>>,
}

impl BuildContext {
    /// Creates an empty context with nothing provided.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a child context in which `value` is visible.
    pub fn provide<P: Send + Sync + 'static>(&self, value: P) -> Self {
        Self {
            head: Some(Arc::new(Frame {
                type_id: TypeId::of::<P>(),
                type_name: std::any::type_name::<P>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Finds the nearest provided value of type `P`.
    pub fn lookup<P: Send + Sync + 'static>(&self) -> Option<&P> {
        let wanted = TypeId::of::<P>();
        self.frames()
            .find(|frame| frame.type_id == wanted)
            .and_then(|frame| frame.value.downcast_ref::<P>())
    }

    /// Like [`lookup`](Self::lookup), but fails when nothing was provided.
    pub fn require<P: Clone + Send + Sync + 'static>(&self) -> Result<P> {
        self.lookup::<P>()
            .cloned()
            .ok_or(ViewError::MissingProvider(std::any::type_name::<P>()))
    }

    /// Returns a child context publishing `reader`.
    pub fn with_reader(&self, reader: SharedReader) -> Self {
        self.provide(reader)
    }

    /// Returns the reader published by the nearest enclosing scope.
    pub fn reader(&self) -> Result<SharedReader> {
        self.lookup::<SharedReader>()
            .cloned()
            .ok_or(ViewError::MissingProvider("storage reader"))
    }

    /// Number of provider frames between this context and the root.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |&frame| frame.parent.as_deref())
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| frame.type_name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{InMemoryStorage, StorageKey};

    fn reader_with(key: &str, value: &str) -> SharedReader {
        Arc::new(InMemoryStorage::from_pairs([(key, value)]))
    }

    #[test]
    fn root_has_no_reader() {
        let ctx = BuildContext::root();
        assert!(matches!(ctx.reader(), Err(ViewError::MissingProvider(_))));
        assert_eq!(ctx.depth(), 0);
    }

    #[tokio::test]
    async fn nearest_reader_shadows_outer() {
        let outer = BuildContext::root().with_reader(reader_with("who", "outer"));
        let inner = outer.with_reader(reader_with("who", "inner"));
        let key = StorageKey::new("who");

        let inner_value = inner.reader().unwrap().read(&key).await.unwrap();
        let outer_value = outer.reader().unwrap().read(&key).await.unwrap();
        assert_eq!(inner_value, Some(serde_json::json!("inner")));
        assert_eq!(outer_value, Some(serde_json::json!("outer")));
    }

    #[test]
    fn lookup_skips_frames_of_other_types() {
        let ctx = BuildContext::root()
            .provide(7u32)
            .provide(String::from("label"));

        assert_eq!(ctx.lookup::<u32>(), Some(&7));
        assert_eq!(ctx.lookup::<String>().map(String::as_str), Some("label"));
        assert!(ctx.lookup::<i64>().is_none());
        assert_eq!(ctx.depth(), 2);
    }

    #[test]
    fn require_reports_missing_type() {
        let ctx = BuildContext::root();
        let err = ctx.require::<u32>().unwrap_err();
        assert_eq!(err.to_string(), "No u32 was published in an enclosing scope");
    }
}
