use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::subscription::{Callback, Slot, Unsubscriber};

/// One callback invocation waiting to run.
struct Delivery<T> {
    slot: Slot<T>,
    value: Arc<T>,
}

struct State<T> {
    value: T,
    next_id: u64,
    slots: Vec<Slot<T>>,
    pending: VecDeque<Delivery<T>>,
    flushing: bool,
}

/// Storage shared by a `Writable` and every `ReadOnly` view of it.
///
/// Every notification goes through `pending`. Only one caller drains it at a
/// time; a `set` or `subscribe` that arrives while a drain is running (from a
/// callback, or from another thread) appends to the queue and returns, and the
/// running drain delivers it after everything queued before it. Each
/// subscriber therefore sees values in write order and its last notification
/// is the stored value.
pub(crate) struct Shared<T> {
    name: Option<&'static str>,
    state: RwLock<State<T>>,
}

/// Resets the drain flag if a callback panics, so the cell keeps notifying.
struct FlushGuard<'a, T>
where
    T: Clone + Send + Sync + 'static,
{
    shared: &'a Shared<T>,
    armed: bool,
}

impl<T> Drop for FlushGuard<'_, T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.shared.write();
            state.pending.clear();
            state.flushing = false;
        }
    }
}

impl<T> Shared<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(name: Option<&'static str>, value: T) -> Arc<Self> {
        Arc::new(Self {
            name,
            state: RwLock::new(State {
                value,
                next_id: 0,
                slots: Vec::new(),
                pending: VecDeque::new(),
                flushing: false,
            }),
        })
    }

    pub(crate) fn name(&self) -> Option<&'static str> {
        self.name
    }

    fn label(&self) -> &'static str {
        self.name.unwrap_or("anonymous")
    }

    // Callbacks never run under the lock, so a poisoned guard still holds a
    // consistent value.
    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> T {
        self.read().value.clone()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.read().slots.len()
    }

    pub(crate) fn set(&self, value: T) {
        let (subscribers, start) = {
            let mut guard = self.write();
            let state = &mut *guard;
            state.value = value.clone();

            let value = Arc::new(value);
            state
                .pending
                .extend(state.slots.iter().map(|slot| Delivery {
                    slot: slot.clone(),
                    value: Arc::clone(&value),
                }));

            (state.slots.len(), !std::mem::replace(&mut state.flushing, true))
        };

        tracing::trace!(
            store = self.label(),
            subscribers,
            queued = !start,
            "store value replaced"
        );

        if start {
            self.flush();
        }
    }

    pub(crate) fn subscribe(self: &Arc<Self>, callback: Callback<T>) -> Unsubscriber {
        let active = Arc::new(AtomicBool::new(true));

        let (id, start) = {
            let mut state = self.write();
            let id = state.next_id;
            state.next_id += 1;

            let slot = Slot {
                id,
                active: Arc::clone(&active),
                callback,
            };
            let current = Arc::new(state.value.clone());
            state.slots.push(slot.clone());
            state.pending.push_back(Delivery {
                slot,
                value: current,
            });

            (id, !std::mem::replace(&mut state.flushing, true))
        };

        tracing::debug!(store = self.label(), subscription = id, "subscribed");

        if start {
            self.flush();
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        Unsubscriber::new(active, move || {
            if let Some(shared) = weak.upgrade() {
                shared.remove(id);
            }
        })
    }

    /// Drains the pending queue, including anything callbacks append to it.
    fn flush(&self) {
        let mut guard = FlushGuard {
            shared: self,
            armed: true,
        };

        loop {
            let delivery = {
                let mut state = self.write();
                match state.pending.pop_front() {
                    Some(delivery) => delivery,
                    None => {
                        state.flushing = false;
                        break;
                    }
                }
            };

            // Checked at delivery time: an earlier callback may have unsubscribed it.
            if delivery.slot.is_active() {
                (delivery.slot.callback)(&*delivery.value);
            }
        }

        guard.armed = false;
    }

    fn remove(&self, id: u64) {
        let removed = {
            let mut state = self.write();
            let before = state.slots.len();
            state.slots.retain(|slot| slot.id != id);
            state.pending.retain(|delivery| delivery.slot.id != id);
            before != state.slots.len()
        };

        if removed {
            tracing::debug!(store = self.label(), subscription = id, "unsubscribed");
        }
    }
}
