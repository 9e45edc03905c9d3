use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A registered callback together with its liveness flag.
pub(crate) struct Slot<T> {
    pub(crate) id: u64,
    pub(crate) active: Arc<AtomicBool>,
    pub(crate) callback: Callback<T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> Slot<T> {
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping it keeps the subscription alive; call [`Unsubscriber::unsubscribe`]
/// to stop notifications.
#[must_use = "dropping an Unsubscriber leaves the callback subscribed forever"]
pub struct Unsubscriber {
    active: Arc<AtomicBool>,
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Unsubscriber {
    pub(crate) fn new(
        active: Arc<AtomicBool>,
        detach: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            active,
            detach: Some(Box::new(detach)),
        }
    }

    /// Stops notifications for this callback.
    ///
    /// Takes effect immediately, even for a notification round already in
    /// progress on another subscriber. A no-op once the cell is gone.
    pub fn unsubscribe(mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Whether the callback still receives notifications.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Unsubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscriber")
            .field("active", &self.is_active())
            .finish()
    }
}
