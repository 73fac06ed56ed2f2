//! Hand-driven media query.

use std::cell::Cell;
use std::rc::Rc;

use colorscheme_app::event_bus::{EventBus, Subscription};
use colorscheme_app::ports::MediaQuery;

#[derive(Default)]
struct Inner {
    matches: Cell<bool>,
    bus: EventBus<bool>,
}

/// A media query whose match state is set by the caller.
///
/// Cloning yields another handle to the same query.
#[derive(Clone, Default)]
pub struct MemoryMediaQuery {
    inner: Rc<Inner>,
}

impl MemoryMediaQuery {
    #[must_use]
    pub fn new(matches: bool) -> Self {
        let query = Self::default();
        query.inner.matches.set(matches);
        query
    }

    /// Change the match state, notifying listeners only on an actual change.
    pub fn set_matches(&self, matches: bool) {
        if self.inner.matches.replace(matches) != matches {
            tracing::trace!(matches, "media query changed");
            self.inner.bus.emit(&matches);
        }
    }

    /// Number of registered native listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.bus.len()
    }
}

impl MediaQuery for MemoryMediaQuery {
    fn matches(&self) -> bool {
        self.inner.matches.get()
    }

    fn on_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        self.inner.bus.subscribe(callback)
    }
}
