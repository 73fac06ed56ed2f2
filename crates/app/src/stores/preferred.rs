//! Preferred scheme — the user's durable `dark`/`light`/`auto` choice.

use std::cell::Cell;
use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::scheme::PreferredScheme;

use crate::event_bus::{EventBus, Subscription};
use crate::ports::{KeyValueStore, StorageChange, StorageEvents};

struct Inner<S> {
    store: S,
    key: String,
    scheme: Cell<PreferredScheme>,
    bus: EventBus<PreferredScheme>,
}

/// Persisted three-state preference, shared across same-origin tabs.
///
/// Cloning yields another handle to the same store.
pub struct PreferredSchemeStorage<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for PreferredSchemeStorage<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore + 'static> PreferredSchemeStorage<S> {
    /// Load the preference stored under `key`.
    ///
    /// Anything other than `dark`, `light` or `auto` (including a missing
    /// key or a failed read) becomes `auto`, which is written back at once.
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let raw = store.get_item(&key).unwrap_or_else(|err| {
            tracing::warn!(%key, error = %err, "failed to read preferred color scheme");
            None
        });

        let scheme = match raw.as_deref().map(str::parse::<PreferredScheme>) {
            Some(Ok(scheme)) => scheme,
            invalid => {
                let scheme = PreferredScheme::default();
                tracing::warn!(
                    %key,
                    stored = ?raw,
                    fallback = %scheme,
                    missing = invalid.is_none(),
                    "healing preferred color scheme"
                );
                if let Err(err) = store.set_item(&key, scheme.as_str()) {
                    tracing::warn!(%key, error = %err, "failed to persist healed color scheme");
                }
                scheme
            }
        };

        Self {
            inner: Rc::new(Inner {
                store,
                key,
                scheme: Cell::new(scheme),
                bus: EventBus::new(),
            }),
        }
    }

    /// The cached preference.
    #[must_use]
    pub fn scheme(&self) -> PreferredScheme {
        self.inner.scheme.get()
    }

    /// The durable key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Persist `scheme` and notify subscribers, unless it is already held.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Storage`] when the write fails; the cached
    /// value is left unchanged in that case.
    pub fn set_scheme(&self, scheme: PreferredScheme) -> Result<(), ColorSchemeError> {
        if self.scheme() == scheme {
            return Ok(());
        }

        self.inner
            .store
            .set_item(&self.inner.key, scheme.as_str())?;
        tracing::debug!(key = %self.inner.key, %scheme, "preferred color scheme changed");
        self.inner.scheme.set(scheme);
        self.inner.bus.emit(&scheme);
        Ok(())
    }

    /// Parse and apply a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::InvalidScheme`] for anything other than
    /// `dark`, `light` or `auto`, leaving the store untouched.
    pub fn set_scheme_str(&self, raw: &str) -> Result<(), ColorSchemeError> {
        self.set_scheme(raw.parse()?)
    }

    /// Reconcile a value written by another browsing context.
    ///
    /// Invalid values are coerced to `auto`. Nothing is written back since
    /// the other context already persisted the change.
    pub fn apply_external_change(&self, raw: Option<&str>) {
        let scheme = PreferredScheme::coerce(raw);
        if self.inner.scheme.replace(scheme) == scheme {
            return;
        }
        tracing::debug!(
            key = %self.inner.key,
            %scheme,
            raw = ?raw,
            "preferred color scheme changed in another context"
        );
        self.inner.bus.emit(&scheme);
    }

    /// Follow writes to the durable key made by other browsing contexts.
    pub fn watch_external(&self, events: &impl StorageEvents) -> Subscription {
        let store = Rc::downgrade(&self.inner);
        events.on_storage_change(Box::new(move |change: &StorageChange| {
            let Some(inner) = store.upgrade() else {
                return;
            };
            if change.affects(&inner.key) {
                PreferredSchemeStorage { inner }.apply_external_change(change.new_value.as_deref());
            }
        }))
    }

    /// Register `callback` for every change, local or external.
    pub fn on_scheme_change(&self, callback: impl Fn(PreferredScheme) + 'static) -> Subscription {
        self.inner.bus.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::stores::fakes::{FakeEvents, FakeStore};

    const KEY: &str = "preferred";

    fn recorded(
        store: &PreferredSchemeStorage<Rc<FakeStore>>,
    ) -> (Rc<RefCell<Vec<PreferredScheme>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.on_scheme_change(move |s| sink.borrow_mut().push(s));
        (seen, sub)
    }

    #[test]
    fn should_adopt_valid_persisted_value() {
        let backing = FakeStore::with(KEY, "dark");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        assert_eq!(store.scheme(), PreferredScheme::Dark);
        assert_eq!(backing.write_count(), 0);
    }

    #[test]
    fn should_heal_garbage_to_auto_and_persist() {
        let backing = FakeStore::with(KEY, "garbage");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        assert_eq!(store.scheme(), PreferredScheme::Auto);
        assert_eq!(backing.value(KEY).as_deref(), Some("auto"));
        assert_eq!(backing.write_count(), 1);
    }

    #[test]
    fn should_persist_auto_when_key_missing() {
        let backing = Rc::new(FakeStore::default());
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        assert_eq!(store.scheme(), PreferredScheme::Auto);
        assert_eq!(backing.value(KEY).as_deref(), Some("auto"));
    }

    #[test]
    fn should_fall_back_to_auto_when_healing_write_fails() {
        let backing = FakeStore::with(KEY, "garbage");
        backing.fail_writes.set(true);
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        assert_eq!(store.scheme(), PreferredScheme::Auto);
    }

    #[test]
    fn should_persist_and_notify_on_change() {
        let backing = FakeStore::with(KEY, "auto");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let (seen, _sub) = recorded(&store);

        store.set_scheme(PreferredScheme::Dark).unwrap();

        assert_eq!(store.scheme(), PreferredScheme::Dark);
        assert_eq!(backing.value(KEY).as_deref(), Some("dark"));
        assert_eq!(*seen.borrow(), vec![PreferredScheme::Dark]);
    }

    #[test]
    fn should_not_write_or_notify_when_value_unchanged() {
        let backing = FakeStore::with(KEY, "light");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let (seen, _sub) = recorded(&store);

        store.set_scheme(PreferredScheme::Light).unwrap();

        assert_eq!(backing.write_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn should_reject_invalid_value_and_keep_state() {
        let backing = FakeStore::with(KEY, "light");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let (seen, _sub) = recorded(&store);

        let result = store.set_scheme_str("blue");

        assert!(matches!(result, Err(ColorSchemeError::InvalidScheme(_))));
        assert_eq!(store.scheme(), PreferredScheme::Light);
        assert_eq!(backing.write_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn should_keep_state_when_write_fails() {
        let backing = FakeStore::with(KEY, "light");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        backing.fail_writes.set(true);

        let result = store.set_scheme(PreferredScheme::Dark);

        assert!(matches!(result, Err(ColorSchemeError::Storage(_))));
        assert_eq!(store.scheme(), PreferredScheme::Light);
    }

    #[test]
    fn should_apply_external_change_without_rewriting() {
        let backing = FakeStore::with(KEY, "auto");
        let events = FakeEvents::default();
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let _watch = store.watch_external(&events);
        let (seen, _sub) = recorded(&store);

        events.fire(KEY, Some("dark"));

        assert_eq!(store.scheme(), PreferredScheme::Dark);
        assert_eq!(*seen.borrow(), vec![PreferredScheme::Dark]);
        assert_eq!(backing.write_count(), 0);
    }

    #[test]
    fn should_coerce_invalid_external_value_to_auto() {
        let backing = FakeStore::with(KEY, "dark");
        let events = FakeEvents::default();
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let _watch = store.watch_external(&events);
        let (seen, _sub) = recorded(&store);

        events.fire(KEY, Some("sepia"));

        assert_eq!(store.scheme(), PreferredScheme::Auto);
        assert_eq!(*seen.borrow(), vec![PreferredScheme::Auto]);
    }

    #[test]
    fn should_ignore_external_change_to_other_key() {
        let backing = FakeStore::with(KEY, "auto");
        let events = FakeEvents::default();
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let _watch = store.watch_external(&events);
        let (seen, _sub) = recorded(&store);

        events.fire("unrelated", Some("dark"));

        assert_eq!(store.scheme(), PreferredScheme::Auto);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn should_not_notify_when_external_value_matches() {
        let backing = FakeStore::with(KEY, "dark");
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        let (seen, _sub) = recorded(&store);

        store.apply_external_change(Some("dark"));

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn should_stop_watching_after_unsubscribe() {
        let backing = FakeStore::with(KEY, "auto");
        let events = FakeEvents::default();
        let store = PreferredSchemeStorage::new(Rc::clone(&backing), KEY);
        store.watch_external(&events).unsubscribe();

        events.fire(KEY, Some("dark"));

        assert_eq!(store.scheme(), PreferredScheme::Auto);
    }
}
