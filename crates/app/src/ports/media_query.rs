//! Media query port — the environment's "prefers dark" signal.

use std::rc::Rc;

use crate::event_bus::Subscription;

/// A live media query such as `(prefers-color-scheme: dark)`.
pub trait MediaQuery {
    /// Whether the query currently matches.
    fn matches(&self) -> bool;

    /// Register `callback` with the new match state on every change.
    ///
    /// Each call registers one native listener; dropping the returned
    /// handle removes it.
    fn on_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription;
}

impl<T: MediaQuery + ?Sized> MediaQuery for Rc<T> {
    fn matches(&self) -> bool {
        (**self).matches()
    }

    fn on_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        (**self).on_change(callback)
    }
}
