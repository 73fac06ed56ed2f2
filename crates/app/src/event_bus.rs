//! In-process, single-threaded event bus with typed payloads.
//!
//! Every store owns one [`EventBus`] for its own value type. Dispatch is
//! synchronous and follows registration order; a panicking subscriber is
//! logged and skipped so the remaining subscribers still run.

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(T)>;

struct Registry<T> {
    next_id: u64,
    slots: Vec<(u64, Callback<T>)>,
}

/// Ordered list of callbacks for one event type.
///
/// Unsubscribing from inside a callback while the same event is being
/// dispatched is unspecified: the subscriber list is snapshotted before
/// dispatch, so a subscriber removed mid-dispatch may still receive that
/// event.
pub struct EventBus<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.len())
            .finish()
    }
}

impl<T: Clone + fmt::Debug + 'static> EventBus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every event emitted *after* this call.
    pub fn subscribe(&self, callback: impl Fn(T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.slots.push((id, Rc::new(callback)));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().slots.retain(|(slot, _)| *slot != id);
            }
        })
    }

    /// Deliver `value` to every current subscriber, in registration order.
    pub fn emit(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .borrow()
            .slots
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for (index, callback) in callbacks.iter().enumerate() {
            let payload = value.clone();
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                tracing::error!(
                    subscriber = index,
                    event = ?value,
                    reason = panic_message(panic.as_ref()),
                    "subscriber panicked during dispatch"
                );
            }
        }
    }
}

impl<T> EventBus<T> {
    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Handle returned by every `on_*` registration.
///
/// Dropping the handle unsubscribes. Call [`detach`](Self::detach) to keep
/// the callback registered for as long as its source lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the deregistration logic of a listener.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to deregister.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Deregister the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the listener registered and release the handle.
    ///
    /// The deregistration closure is leaked so that any native callback it
    /// owns stays valid.
    pub fn detach(mut self) {
        if let Some(cancel) = self.cancel.take() {
            std::mem::forget(cancel);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
