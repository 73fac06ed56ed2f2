//! Current scheme — the concrete scheme applied for this browsing session.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::scheme::{ColorScheme, PreferredScheme};
use colorscheme_domain::theme::ThemeNames;

use crate::event_bus::{EventBus, Subscription};
use crate::ports::{KeyValueStore, MediaQuery};
use crate::stores::preferred::PreferredSchemeStorage;
use crate::stores::system::SystemSchemeStorage;

struct Inner<S, P, M> {
    session: S,
    key: String,
    system: SystemSchemeStorage<M>,
    preferred: PreferredSchemeStorage<P>,
    scheme: Cell<ColorScheme>,
    themes: RefCell<ThemeNames>,
    bus: EventBus<ColorScheme>,
}

/// The effective `dark`/`light` scheme, cached in session storage.
///
/// Generic over the session store `S`, the durable store `P` behind the
/// preferred scheme, and the media query `M` behind the system scheme.
/// Cloning yields another handle to the same store.
pub struct CurrentColorSchemeStorage<S, P, M> {
    inner: Rc<Inner<S, P, M>>,
}

impl<S, P, M> Clone for CurrentColorSchemeStorage<S, P, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, P, M> CurrentColorSchemeStorage<S, P, M>
where
    S: KeyValueStore + 'static,
    P: KeyValueStore + 'static,
    M: MediaQuery + 'static,
{
    /// Resolve the initial scheme.
    ///
    /// A `dark`/`light` value already cached under `key` wins; otherwise a
    /// concrete preferred scheme; otherwise the system scheme. Nothing is
    /// written to the session store here.
    #[must_use]
    pub fn new(
        session: S,
        key: impl Into<String>,
        system: SystemSchemeStorage<M>,
        preferred: PreferredSchemeStorage<P>,
    ) -> Self {
        let key = key.into();
        let cached = session
            .get_item(&key)
            .unwrap_or_else(|err| {
                tracing::warn!(%key, error = %err, "failed to read session color scheme");
                None
            })
            .and_then(|raw| raw.parse::<ColorScheme>().ok());

        let scheme = cached.unwrap_or_else(|| preferred.scheme().resolve(|| system.scheme()));
        tracing::debug!(%key, %scheme, from_session = cached.is_some(), "resolved color scheme");

        Self {
            inner: Rc::new(Inner {
                session,
                key,
                system,
                preferred,
                scheme: Cell::new(scheme),
                themes: RefCell::new(ThemeNames::default()),
                bus: EventBus::new(),
            }),
        }
    }

    /// The cached concrete scheme.
    #[must_use]
    pub fn scheme(&self) -> ColorScheme {
        self.inner.scheme.get()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.scheme().is_dark()
    }

    #[must_use]
    pub fn system(&self) -> &SystemSchemeStorage<M> {
        &self.inner.system
    }

    #[must_use]
    pub fn preferred(&self) -> &PreferredSchemeStorage<P> {
        &self.inner.preferred
    }

    /// Apply `requested`, resolving `auto` through the preferred scheme and
    /// then the system scheme.
    ///
    /// Change detection compares the resolved value: asking for `auto` when
    /// it resolves to the cached scheme writes and notifies nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Storage`] when the session write fails;
    /// the cached value is left unchanged in that case.
    pub fn set_scheme(
        &self,
        requested: impl Into<PreferredScheme>,
    ) -> Result<(), ColorSchemeError> {
        let requested = requested.into();
        let resolved = requested.resolve(|| {
            self.inner
                .preferred
                .scheme()
                .resolve(|| self.inner.system.scheme())
        });

        if resolved == self.scheme() {
            return Ok(());
        }

        self.inner
            .session
            .set_item(&self.inner.key, resolved.as_str())?;
        tracing::debug!(
            key = %self.inner.key,
            %requested,
            scheme = %resolved,
            "current color scheme changed"
        );
        self.inner.scheme.set(resolved);
        self.inner.bus.emit(&resolved);
        Ok(())
    }

    /// Parse and apply a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::InvalidScheme`] for anything other than
    /// `dark`, `light` or `auto`, leaving the store untouched.
    pub fn set_scheme_str(&self, raw: &str) -> Result<(), ColorSchemeError> {
        self.set_scheme(raw.parse::<PreferredScheme>()?)
    }

    /// Switch to the opposite concrete scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Storage`] when the session write fails.
    pub fn toggle(&self) -> Result<(), ColorSchemeError> {
        self.set_scheme(self.scheme().toggled())
    }

    /// Register `callback` for every change of the concrete scheme.
    pub fn on_scheme_change(&self, callback: impl Fn(ColorScheme) + 'static) -> Subscription {
        self.inner.bus.subscribe(callback)
    }
}

impl<S, P, M> CurrentColorSchemeStorage<S, P, M> {
    /// Theme token for the cached scheme.
    #[must_use]
    pub fn default_theme(&self) -> String {
        let scheme = self.inner.scheme.get();
        self.inner.themes.borrow().for_scheme(scheme).to_string()
    }

    #[must_use]
    pub fn dark_theme(&self) -> String {
        self.inner.themes.borrow().dark.clone()
    }

    #[must_use]
    pub fn light_theme(&self) -> String {
        self.inner.themes.borrow().light.clone()
    }

    /// Takes effect on the next [`default_theme`](Self::default_theme) call;
    /// subscribers are not notified.
    pub fn set_dark_theme(&self, name: impl Into<String>) {
        self.inner.themes.borrow_mut().dark = name.into();
    }

    /// Takes effect on the next [`default_theme`](Self::default_theme) call;
    /// subscribers are not notified.
    pub fn set_light_theme(&self, name: impl Into<String>) {
        self.inner.themes.borrow_mut().light = name.into();
    }

    pub fn set_theme_names(&self, names: ThemeNames) {
        *self.inner.themes.borrow_mut() = names;
    }
}
