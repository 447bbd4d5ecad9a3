//! Built view instances and the reads they own.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use tokio::sync::watch;

use crate::node::Node;
use crate::snapshot::{ReadFailure, ReadSnapshot, render_snapshot};

/// A built view.
///
/// Async elements own exactly one read. Dropping an element does not cancel
/// that read; its result is discarded when it arrives.
#[derive(Debug)]
pub enum Element {
    /// Output fixed at build time.
    Static(Node),
    /// Output driven by one in-flight read.
    Async(AsyncRead),
    /// Children rendered as a list, in order.
    Group(Vec<Element>),
}

/// The receiving half of a spawned read.
#[derive(Debug)]
pub struct AsyncRead {
    label: String,
    state: watch::Receiver<ReadSnapshot<Node>>,
}

impl AsyncRead {
    /// Spawns `read` on the current Tokio runtime and renders its value with
    /// `present`.
    ///
    /// The element starts out pending. When `read` settles, a success is
    /// handed to `present` only if the element is still alive; otherwise the
    /// result is discarded without presenting it. A panic in either `read` or
    /// `present` settles the element as failed. Must be called from within a
    /// Tokio runtime.
    pub fn spawn<T, F, P>(label: impl Into<String>, read: F, present: P) -> Self
    where
        T: Send + 'static,
        F: Future<Output = ReadSnapshot<T>> + Send + 'static,
        P: FnOnce(T) -> Node + Send + 'static,
    {
        let label = label.into();
        let (tx, rx) = watch::channel(ReadSnapshot::Pending);
        metrics::counter!("inspector_reads_started").increment(1);

        let task_label = label.clone();
        tokio::spawn(async move {
            let snapshot = match AssertUnwindSafe(read).catch_unwind().await {
                Ok(snapshot) => snapshot,
                Err(panic) => ReadSnapshot::Failed(panic_failure("read", &*panic)),
            };

            if tx.is_closed() {
                tracing::debug!(label = %task_label, "element dropped before read settled, discarding result");
                return;
            }

            let snapshot = match snapshot {
                ReadSnapshot::Succeeded(value) => {
                    match std::panic::catch_unwind(AssertUnwindSafe(|| present(value))) {
                        Ok(node) => ReadSnapshot::Succeeded(node),
                        Err(panic) => {
                            ReadSnapshot::Failed(panic_failure("presenter", &*panic))
                        }
                    }
                }
                ReadSnapshot::Failed(failure) => ReadSnapshot::Failed(failure),
                ReadSnapshot::Pending => ReadSnapshot::Pending,
            };

            if let ReadSnapshot::Failed(failure) = &snapshot {
                metrics::counter!("inspector_reads_failed").increment(1);
                tracing::warn!(label = %task_label, cause = %failure, "storage read failed");
            }
            if tx.send(snapshot).is_err() {
                tracing::debug!(label = %task_label, "element dropped before read settled, discarding result");
            }
        });

        Self { label, state: rx }
    }

    /// Returns the label this read was spawned with.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> ReadSnapshot<Node> {
        self.state.borrow().clone()
    }
}

impl Element {
    /// Renders the element's current state.
    pub fn render(&self) -> Node {
        match self {
            Self::Static(node) => node.clone(),
            Self::Async(read) => render_snapshot(&read.state.borrow()),
            Self::Group(children) => Node::List(children.iter().map(Element::render).collect()),
        }
    }

    /// Returns true once no read in this subtree is pending.
    pub fn is_settled(&self) -> bool {
        match self {
            Self::Static(_) => true,
            Self::Async(read) => read.state.borrow().is_settled(),
            Self::Group(children) => children.iter().all(Element::is_settled),
        }
    }

    /// Waits until every read in this subtree has settled.
    ///
    /// There is no timeout: a backend that never answers keeps this pending.
    pub fn settled(&self) -> BoxFuture<'_, ()> {
        match self {
            Self::Static(_) => std::future::ready(()).boxed(),
            Self::Async(read) => {
                let mut state = read.state.clone();
                async move {
                    // An error means the read task went away without a result.
                    let settled = state.wait_for(ReadSnapshot::is_settled).await.map(|_| ());
                    if settled.is_err() {
                        tracing::debug!(label = %read.label, "read task ended without a snapshot");
                    }
                }
                .boxed()
            }
            Self::Group(children) => join_all(children.iter().map(Element::settled))
                .map(|_| ())
                .boxed(),
        }
    }

    /// Collects the failures of every rejected read in this subtree.
    pub fn failures(&self) -> Vec<ReadFailure> {
        match self {
            Self::Static(_) => Vec::new(),
            Self::Async(read) => read.state.borrow().failure().cloned().into_iter().collect(),
            Self::Group(children) => children.iter().flat_map(Element::failures).collect(),
        }
    }
}

fn panic_failure(stage: &str, panic: &(dyn Any + Send)) -> ReadFailure {
    let message = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    ReadFailure::new(format!("{stage} panicked: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::identity;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn async_read_starts_pending_then_settles() {
        let element = Element::Async(AsyncRead::spawn(
            "test",
            async { ReadSnapshot::Succeeded("done") },
            Node::text,
        ));

        assert_eq!(element.render(), Node::loading());
        assert!(!element.is_settled());

        element.settled().await;
        assert_eq!(element.render(), Node::text("done"));
        assert!(element.failures().is_empty());
    }

    #[tokio::test]
    async fn group_waits_for_every_child() {
        let element = Element::Group(vec![
            Element::Static(Node::text("header")),
            Element::Async(AsyncRead::spawn(
                "ok",
                async { ReadSnapshot::Succeeded(Node::text("ok")) },
                identity,
            )),
            Element::Async(AsyncRead::spawn(
                "bad",
                async { ReadSnapshot::Failed(ReadFailure::new("boom")) },
                identity,
            )),
        ]);

        element.settled().await;
        assert!(element.is_settled());
        assert_eq!(
            element.render(),
            Node::List(vec![Node::text("header"), Node::text("ok"), Node::failure()])
        );
        assert_eq!(element.failures(), vec![ReadFailure::new("boom")]);
    }

    #[tokio::test]
    async fn failed_read_skips_presenter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let element = Element::Async(AsyncRead::spawn(
            "bad",
            async { ReadSnapshot::<u8>::Failed(ReadFailure::new("locked")) },
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Node::Empty
            },
        ));

        element.settled().await;
        assert_eq!(element.render(), Node::failure());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn panicking_read_settles_as_failure() {
        let element = Element::Async(AsyncRead::spawn(
            "panics",
            async {
                if true {
                    panic!("backend exploded");
                }
                ReadSnapshot::Succeeded(Node::Empty)
            },
            identity,
        ));

        element.settled().await;
        assert!(element.is_settled());
        assert_eq!(element.render(), Node::failure());
        assert_eq!(
            element.failures(),
            vec![ReadFailure::new("read panicked: backend exploded")]
        );
    }

    #[tokio::test]
    async fn panicking_presenter_settles_as_failure() {
        let element = Element::Async(AsyncRead::spawn(
            "presenter",
            async { ReadSnapshot::Succeeded(7u8) },
            |value| -> Node { panic!("cannot present {value}") },
        ));

        element.settled().await;
        assert_eq!(element.render(), Node::failure());
        assert_eq!(
            element.failures(),
            vec![ReadFailure::new("presenter panicked: cannot present 7")]
        );
    }
}
