use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::Readable;
use crate::cell::Shared;
use crate::subscription::Unsubscriber;
use crate::writable::Writable;

/// Observing half of a cell: can be read and subscribed to, never set.
///
/// A `ReadOnly` built by [`derived`] stays connected to its source until
/// [`ReadOnly::disconnect`] is called or the source is dropped. Dropping the
/// `ReadOnly` itself does not disconnect it.
pub struct ReadOnly<T> {
    shared: Arc<Shared<T>>,
    upstream: Option<Arc<Mutex<Option<Unsubscriber>>>>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            upstream: self.upstream.clone(),
        }
    }
}

impl<T> ReadOnly<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn from_shared(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared,
            upstream: None,
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.shared.name()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscriber_count()
    }

    /// Stops recomputing from the source; the current value is kept.
    ///
    /// Shared by every clone of a derived cell. A no-op for a plain
    /// [`Writable::read_only`] view.
    pub fn disconnect(&self) {
        let Some(upstream) = &self.upstream else {
            return;
        };

        let handle = upstream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.unsubscribe();
        }
    }

    /// Whether this cell still follows a source.
    pub fn is_connected(&self) -> bool {
        self.upstream.as_ref().is_some_and(|upstream| {
            upstream
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .as_ref()
                .is_some_and(Unsubscriber::is_active)
        })
    }
}

impl<T> Readable<T> for ReadOnly<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self) -> T {
        self.shared.get()
    }

    fn subscribe<F>(&self, callback: F) -> Unsubscriber
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.shared.subscribe(Arc::new(callback))
    }
}

impl<T> fmt::Debug for ReadOnly<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnly")
            .field("name", &self.name())
            .field("value", &self.shared.get())
            .finish()
    }
}

/// Builds a read-only cell holding `f(source)`, recomputed on every change of
/// `source`.
///
/// The derived cell stays connected for as long as `source` lives, unless
/// [`ReadOnly::disconnect`] is called.
pub fn derived<S, U, R, F>(name: &'static str, source: &R, f: F) -> ReadOnly<U>
where
    S: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    R: Readable<S>,
    F: Fn(&S) -> U + Send + Sync + 'static,
{
    let target = Writable::named(name, f(&source.get()));
    let sink = target.clone();

    // The immediate call on subscribe recomputes the same value before anyone
    // can observe the target.
    let upstream = source.subscribe(move |value| sink.set(f(value)));

    let mut view = target.read_only();
    view.upstream = Some(Arc::new(Mutex::new(Some(upstream))));
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_follows_source() {
        let source = Writable::new(3);
        let doubled = derived("doubled", &source, |v: &i32| v * 2);
        assert_eq!(doubled.get(), 6);

        source.set(10);
        assert_eq!(doubled.get(), 20);
        assert_eq!(doubled.name(), Some("doubled"));
    }

    #[test]
    fn test_disconnect_freezes_derived_value() {
        let source = Writable::new(1);
        let plus_one = derived("plus_one", &source, |v: &i32| v + 1);
        let clone = plus_one.clone();
        assert!(plus_one.is_connected());

        clone.disconnect();
        source.set(50);

        assert!(!plus_one.is_connected());
        assert_eq!(plus_one.get(), 2);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_disconnect_on_plain_view_is_noop() {
        let cell = Writable::new(3);
        let view = cell.read_only();
        assert!(!view.is_connected());

        view.disconnect();
        cell.set(4);
        assert_eq!(view.get(), 4);
    }

    #[test]
    fn test_read_only_sees_writes() {
        let cell = Writable::new(String::new());
        let view = cell.read_only();
        cell.set("2025-01-28".to_string());
        assert_eq!(view.get(), "2025-01-28");
    }
}
