//! System scheme — the environment's reported light/dark preference.

use colorscheme_domain::scheme::ColorScheme;

use crate::event_bus::Subscription;
use crate::ports::MediaQuery;

/// Read-only view over the "prefers dark" media query.
///
/// Nothing is cached: [`scheme`](Self::scheme) asks the query every time.
#[derive(Debug, Clone)]
pub struct SystemSchemeStorage<M> {
    media: M,
}

impl<M: MediaQuery> SystemSchemeStorage<M> {
    #[must_use]
    pub fn new(media: M) -> Self {
        Self { media }
    }

    /// `Dark` when the query matches, `Light` otherwise.
    #[must_use]
    pub fn scheme(&self) -> ColorScheme {
        ColorScheme::from_prefers_dark(self.media.matches())
    }

    /// Register `callback` with the recomputed scheme on every change of the
    /// underlying query. One native listener is registered per call.
    pub fn on_scheme_change(&self, callback: impl Fn(ColorScheme) + 'static) -> Subscription {
        self.media.on_change(Box::new(move |matches| {
            let scheme = ColorScheme::from_prefers_dark(matches);
            tracing::debug!(%scheme, "system color scheme changed");
            callback(scheme);
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::stores::fakes::FakeMedia;

    #[test]
    fn should_report_dark_when_query_matches() {
        let system = SystemSchemeStorage::new(FakeMedia::dark());
        assert_eq!(system.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn should_report_light_when_query_does_not_match() {
        let system = SystemSchemeStorage::new(FakeMedia::light());
        assert_eq!(system.scheme(), ColorScheme::Light);
    }

    #[test]
    fn should_follow_query_without_caching() {
        let media = FakeMedia::light();
        let system = SystemSchemeStorage::new(Rc::clone(&media));
        media.set(true);
        assert_eq!(system.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn should_notify_each_subscriber_with_new_scheme() {
        let media = FakeMedia::light();
        let system = SystemSchemeStorage::new(Rc::clone(&media));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        let _a = system.on_scheme_change(move |s| first.borrow_mut().push(("a", s)));
        let second = Rc::clone(&seen);
        let _b = system.on_scheme_change(move |s| second.borrow_mut().push(("b", s)));

        media.set(true);

        assert_eq!(
            *seen.borrow(),
            vec![("a", ColorScheme::Dark), ("b", ColorScheme::Dark)]
        );
    }

    #[test]
    fn should_remove_native_listener_on_unsubscribe() {
        let media = FakeMedia::light();
        let system = SystemSchemeStorage::new(Rc::clone(&media));

        let sub = system.on_scheme_change(|_| {});
        assert_eq!(media.listeners(), 1);

        sub.unsubscribe();
        assert_eq!(media.listeners(), 0);
    }
}
