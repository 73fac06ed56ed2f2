//! Color mode controller — the single place where the stores are wired
//! together and to the document.
//!
//! ## Propagation rules
//! - system → current: only while the preferred scheme is `auto`
//! - preferred → current: always, `auto` resolving through the system scheme
//! - current → document: the root attribute follows
//!   [`default_theme`](CurrentColorSchemeStorage::default_theme)

use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::scheme::PreferredScheme;

use crate::dom::ThemeApplier;
use crate::event_bus::Subscription;
use crate::ports::{Document, KeyValueStore, MediaQuery, StorageEvents};
use crate::settings::Settings;
use crate::stores::{CurrentColorSchemeStorage, PreferredSchemeStorage, SystemSchemeStorage};

/// The environment a controller runs against.
pub struct Ports<L, S, E, M, D> {
    /// Durable store (`localStorage`).
    pub local: L,
    /// Session store (`sessionStorage`).
    pub session: S,
    /// Change notifications for `local` made by other contexts.
    pub events: E,
    /// The `(prefers-color-scheme: dark)` query.
    pub media: M,
    pub document: D,
}

/// Owns the three stores and every internal subscription between them.
///
/// Dropping the controller detaches all of its listeners; handles obtained
/// from [`current`](Self::current) or [`preferred`](Self::preferred) keep
/// working as plain stores afterwards.
pub struct ColorModeController<L, S, M, D> {
    current: CurrentColorSchemeStorage<S, L, M>,
    applier: Rc<ThemeApplier<D>>,
    subscriptions: Vec<Subscription>,
}

impl<L, S, M, D> ColorModeController<L, S, M, D>
where
    L: KeyValueStore + 'static,
    S: KeyValueStore + 'static,
    M: MediaQuery + 'static,
    D: Document + 'static,
{
    /// Build the stores, wire them, and apply the initial theme.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Document`] when the initial theme, meta
    /// tags or input style cannot be written.
    pub fn new<E: StorageEvents>(
        ports: Ports<L, S, E, M, D>,
        settings: &Settings,
    ) -> Result<Self, ColorSchemeError> {
        let Ports {
            local,
            session,
            events,
            media,
            document,
        } = ports;

        let preferred = PreferredSchemeStorage::new(local, settings.preferred_key.clone());
        let current = CurrentColorSchemeStorage::new(
            session,
            settings.current_key.clone(),
            SystemSchemeStorage::new(media),
            preferred.clone(),
        );
        current.set_theme_names(settings.theme_names.clone());
        let applier = Rc::new(ThemeApplier::new(document, settings.attribute.clone()));

        let subscriptions = vec![
            preferred.watch_external(&events),
            follow_system(&current),
            follow_preferred(&current),
            apply_on_change(&current, &applier),
        ];

        applier.apply(&current.default_theme())?;
        if let Some(colors) = &settings.meta_colors {
            applier.add_meta_theme_colors(colors)?;
        }
        if settings.adapt_inputs {
            applier.adapt_inputs_to_preferred_scheme()?;
        }

        tracing::info!(
            scheme = %current.scheme(),
            preferred = %preferred.scheme(),
            system = %current.system().scheme(),
            attribute = %applier.attribute(),
            "color mode initialised"
        );

        Ok(Self {
            current,
            applier,
            subscriptions,
        })
    }

    #[must_use]
    pub fn current(&self) -> &CurrentColorSchemeStorage<S, L, M> {
        &self.current
    }

    #[must_use]
    pub fn preferred(&self) -> &PreferredSchemeStorage<L> {
        self.current.preferred()
    }

    #[must_use]
    pub fn system(&self) -> &SystemSchemeStorage<M> {
        self.current.system()
    }

    #[must_use]
    pub fn applier(&self) -> &ThemeApplier<D> {
        &self.applier
    }

    /// Write the current theme token again, e.g. after renaming themes.
    ///
    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port.
    pub fn refresh(&self) -> Result<(), ColorSchemeError> {
        self.applier.apply(&self.current.default_theme())
    }

    /// Write the current theme token on `element` only.
    ///
    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port.
    pub fn apply_theme_to_element(&self, element: &D::Element) -> Result<(), ColorSchemeError> {
        self.applier
            .apply_to_element(element, &self.current.default_theme())
    }

    /// Number of live internal subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

fn follow_system<S, L, M>(current: &CurrentColorSchemeStorage<S, L, M>) -> Subscription
where
    S: KeyValueStore + 'static,
    L: KeyValueStore + 'static,
    M: MediaQuery + 'static,
{
    let target = current.clone();
    current.system().on_scheme_change(move |scheme| {
        let preferred = target.preferred().scheme();
        if preferred != PreferredScheme::Auto {
            tracing::debug!(%scheme, %preferred, "system change ignored, explicit preference set");
            return;
        }
        if let Err(err) = target.set_scheme(scheme) {
            tracing::warn!(%scheme, error = %err, "failed to follow system color scheme");
        }
    })
}

fn follow_preferred<S, L, M>(current: &CurrentColorSchemeStorage<S, L, M>) -> Subscription
where
    S: KeyValueStore + 'static,
    L: KeyValueStore + 'static,
    M: MediaQuery + 'static,
{
    let target = current.clone();
    current.preferred().on_scheme_change(move |preferred| {
        if let Err(err) = target.set_scheme(preferred) {
            tracing::warn!(%preferred, error = %err, "failed to follow preferred color scheme");
        }
    })
}

fn apply_on_change<S, L, M, D>(
    current: &CurrentColorSchemeStorage<S, L, M>,
    applier: &Rc<ThemeApplier<D>>,
) -> Subscription
where
    S: KeyValueStore + 'static,
    L: KeyValueStore + 'static,
    M: MediaQuery + 'static,
    D: Document + 'static,
{
    let source = current.clone();
    let applier = Rc::clone(applier);
    current.on_scheme_change(move |scheme| {
        let theme = source.default_theme();
        if let Err(err) = applier.apply(&theme) {
            tracing::warn!(%scheme, %theme, error = %err, "failed to apply theme to document");
        }
    })
}
