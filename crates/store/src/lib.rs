//! Reactive value cells with synchronous subscriber notification.
//!
//! A [`Writable`] holds a value that can be read, replaced and observed.
//! Subscribers are called immediately with the current value and then once
//! per [`Writable::set`], in the order they subscribed. [`ReadOnly`] exposes
//! the observing half of a cell, and [`derived`] builds a read-only cell
//! whose value is computed from another one.

mod cell;
mod derived;
mod subscription;
mod writable;

pub use derived::{ReadOnly, derived};
pub use subscription::Unsubscriber;
pub use writable::Writable;

/// Common interface for anything that can be read and observed.
pub trait Readable<T> {
    /// Returns a clone of the current value.
    fn get(&self) -> T;

    /// Registers `callback`, invokes it right away with the current value and
    /// again after every later change.
    ///
    /// When called while the cell is notifying, the first call is queued
    /// behind the deliveries already in progress.
    fn subscribe<F>(&self, callback: F) -> Unsubscriber
    where
        F: Fn(&T) + Send + Sync + 'static;
}
