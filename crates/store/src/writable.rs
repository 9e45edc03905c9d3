use std::fmt;
use std::sync::Arc;

use crate::Readable;
use crate::cell::Shared;
use crate::derived::ReadOnly;
use crate::subscription::Unsubscriber;

/// A mutable value whose changes are pushed to subscribers.
///
/// Clones share the same underlying value and subscriber list.
pub struct Writable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Writable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an unnamed cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            shared: Shared::new(None, value),
        }
    }

    /// Creates a cell with a label that shows up in log output.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            shared: Shared::new(Some(name), value),
        }
    }

    /// Label given to [`Writable::named`], if any.
    pub fn name(&self) -> Option<&'static str> {
        self.shared.name()
    }

    /// Replaces the value and notifies every current subscriber once.
    ///
    /// Subscribers are notified even when `value` equals the previous value.
    /// When called while this cell is already notifying (from a callback, or
    /// from another thread), the notifications are queued behind the ones in
    /// progress and delivered by that round before it returns.
    pub fn set(&self, value: T) {
        self.shared.set(value);
    }

    /// Sets the value to `f(current)`.
    ///
    /// Reading and writing are two separate steps, so a concurrent `set` from
    /// another thread in between is overwritten.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.shared.get());
        self.shared.set(next);
    }

    /// Number of subscriptions that have not been cancelled.
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscriber_count()
    }

    /// Returns a handle that can observe this cell but not modify it.
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly::from_shared(Arc::clone(&self.shared))
    }
}

impl<T> Readable<T> for Writable<T>
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

impl<T> Default for Writable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for Writable<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable")
            .field("name", &self.name())
            .field("value", &self.shared.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
