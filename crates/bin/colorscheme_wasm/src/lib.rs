//! # colorscheme-wasm — JavaScript entry point
//!
//! Composition root that wires the browser adapters into a
//! [`ColorModeController`] and exports it as the `ColorMode` class.
//!
//! ## Responsibilities
//! - Parse configuration (JSON object, JSON text or TOML text)
//! - Install console logging
//! - Open `localStorage`, `sessionStorage`, the dark-scheme media query and
//!   the document
//! - Expose the controller to JavaScript, mapping errors to `Error`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.
//!
//! ```js
//! import init, { ColorMode } from "./colorscheme_wasm.js";
//!
//! await init();
//! const mode = new ColorMode({ meta: { enabled: true } });
//! const sub = mode.onSchemeChange((scheme) => console.log(scheme));
//! mode.toggle();
//! sub.unsubscribe();
//! ```

pub mod config;
pub mod logging;

use colorscheme_adapter_web::{BrowserDocument, BrowserMediaQuery, BrowserStorage, WebError};
use colorscheme_app::controller::{ColorModeController, Ports};
use colorscheme_app::event_bus::Subscription;
use colorscheme_domain::scheme::{ColorScheme, PreferredScheme};
use wasm_bindgen::prelude::*;

use crate::config::Config;

type BrowserController =
    ColorModeController<BrowserStorage, BrowserStorage, BrowserMediaQuery, BrowserDocument>;

/// The page's color mode.
#[wasm_bindgen]
pub struct ColorMode {
    controller: BrowserController,
}

#[wasm_bindgen]
impl ColorMode {
    /// Build from an optional configuration: `undefined`, a plain object,
    /// or JSON/TOML text.
    ///
    /// # Errors
    ///
    /// Throws on invalid configuration, unavailable storage, or when the
    /// initial theme cannot be written to the document.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<ColorMode, JsError> {
        let config = Config::parse(&config_text(config)?)?;
        logging::init(&config.logging.filter);

        let local = BrowserStorage::local()?;
        let ports = Ports {
            local: local.clone(),
            session: BrowserStorage::session()?,
            events: local,
            media: BrowserMediaQuery::prefers_dark()?,
            document: BrowserDocument::current()?,
        };
        let controller = ColorModeController::new(ports, &config.settings())?;
        Ok(Self { controller })
    }

    /// `"dark"` or `"light"`.
    #[must_use]
    #[wasm_bindgen(getter)]
    pub fn scheme(&self) -> String {
        self.controller.current().scheme().to_string()
    }

    #[must_use]
    #[wasm_bindgen(getter, js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.controller.current().is_dark()
    }

    /// Set the current scheme for this session; `"auto"` resolves through
    /// the preferred and system schemes.
    ///
    /// # Errors
    ///
    /// Throws on anything other than `dark`, `light` or `auto`.
    #[wasm_bindgen(js_name = setScheme)]
    pub fn set_scheme(&self, scheme: &str) -> Result<(), JsError> {
        Ok(self.controller.current().set_scheme_str(scheme)?)
    }

    /// `"dark"`, `"light"` or `"auto"`.
    #[must_use]
    #[wasm_bindgen(getter, js_name = preferredScheme)]
    pub fn preferred_scheme(&self) -> String {
        self.controller.preferred().scheme().to_string()
    }

    /// Persist the preferred scheme for every tab of this origin.
    ///
    /// # Errors
    ///
    /// Throws on an invalid value or when `localStorage` rejects the write.
    #[wasm_bindgen(js_name = setPreferredScheme)]
    pub fn set_preferred_scheme(&self, scheme: &str) -> Result<(), JsError> {
        Ok(self.controller.preferred().set_scheme_str(scheme)?)
    }

    #[must_use]
    #[wasm_bindgen(getter, js_name = systemScheme)]
    pub fn system_scheme(&self) -> String {
        self.controller.system().scheme().to_string()
    }

    /// Flip between dark and light for this session.
    ///
    /// # Errors
    ///
    /// Throws when `sessionStorage` rejects the write.
    pub fn toggle(&self) -> Result<(), JsError> {
        Ok(self.controller.current().toggle()?)
    }

    /// Theme token for the current scheme.
    #[must_use]
    #[wasm_bindgen(getter, js_name = defaultTheme)]
    pub fn default_theme(&self) -> String {
        self.controller.current().default_theme()
    }

    #[must_use]
    #[wasm_bindgen(getter, js_name = darkTheme)]
    pub fn dark_theme(&self) -> String {
        self.controller.current().dark_theme()
    }

    #[wasm_bindgen(setter, js_name = darkTheme)]
    pub fn set_dark_theme(&self, name: String) {
        self.controller.current().set_dark_theme(name);
    }

    #[must_use]
    #[wasm_bindgen(getter, js_name = lightTheme)]
    pub fn light_theme(&self) -> String {
        self.controller.current().light_theme()
    }

    #[wasm_bindgen(setter, js_name = lightTheme)]
    pub fn set_light_theme(&self, name: String) {
        self.controller.current().set_light_theme(name);
    }

    /// Write the current theme token to the document root again.
    ///
    /// # Errors
    ///
    /// Throws when the document rejects the attribute.
    pub fn refresh(&self) -> Result<(), JsError> {
        Ok(self.controller.refresh()?)
    }

    /// Write the current theme token on `element` only.
    ///
    /// # Errors
    ///
    /// Throws when the element rejects the attribute.
    #[wasm_bindgen(js_name = applyThemeToElement)]
    pub fn apply_theme_to_element(&self, element: &web_sys::Element) -> Result<(), JsError> {
        Ok(self.controller.apply_theme_to_element(element)?)
    }

    /// Call `callback(scheme)` whenever the current scheme changes.
    #[must_use]
    #[wasm_bindgen(js_name = onSchemeChange)]
    pub fn on_scheme_change(&self, callback: js_sys::Function) -> SchemeSubscription {
        let subscription = self
            .controller
            .current()
            .on_scheme_change(move |scheme: ColorScheme| call_js(&callback, scheme.as_str()));
        SchemeSubscription::new(subscription)
    }

    /// Call `callback(scheme)` whenever the preferred scheme changes, in
    /// this tab or another.
    #[must_use]
    #[wasm_bindgen(js_name = onPreferredSchemeChange)]
    pub fn on_preferred_scheme_change(&self, callback: js_sys::Function) -> SchemeSubscription {
        let subscription = self
            .controller
            .preferred()
            .on_scheme_change(move |scheme: PreferredScheme| call_js(&callback, scheme.as_str()));
        SchemeSubscription::new(subscription)
    }
}

/// Returned by `onSchemeChange`; call `unsubscribe()` to stop listening.
#[wasm_bindgen]
pub struct SchemeSubscription {
    inner: Option<Subscription>,
}

impl SchemeSubscription {
    fn new(subscription: Subscription) -> Self {
        Self {
            inner: Some(subscription),
        }
    }
}

#[wasm_bindgen]
impl SchemeSubscription {
    /// Stop listening. Calling it again does nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(subscription) = self.inner.take() {
            subscription.unsubscribe();
        }
    }
}

fn call_js(callback: &js_sys::Function, scheme: &str) {
    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(scheme)) {
        tracing::error!(scheme, error = %WebError::from(err), "scheme change callback threw");
    }
}

fn config_text(config: &JsValue) -> Result<String, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(String::new());
    }
    if let Some(text) = config.as_string() {
        return Ok(text);
    }
    js_sys::JSON::stringify(config)
        .map(String::from)
        .map_err(|err| JsError::from(WebError::from(err)))
}
