//! `localStorage` / `sessionStorage` and the `storage` event.

use colorscheme_app::event_bus::Subscription;
use colorscheme_app::ports::{KeyValueStore, StorageChange, StorageEvents};
use colorscheme_domain::error::ColorSchemeError;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::StorageEvent;

use crate::error::WebError;

type StorageListener = Closure<dyn FnMut(StorageEvent)>;

/// Which Web Storage area a [`BrowserStorage`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Session,
}

impl StorageKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

/// One Web Storage area of the current window.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
    kind: StorageKind,
}

impl BrowserStorage {
    /// The window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::StorageUnavailable`] when storage is disabled.
    pub fn local() -> Result<Self, WebError> {
        Self::open(StorageKind::Local)
    }

    /// The window's `sessionStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::StorageUnavailable`] when storage is disabled.
    pub fn session() -> Result<Self, WebError> {
        Self::open(StorageKind::Session)
    }

    fn open(kind: StorageKind) -> Result<Self, WebError> {
        let window = crate::window()?;
        let storage = match kind {
            StorageKind::Local => window.local_storage(),
            StorageKind::Session => window.session_storage(),
        }
        .ok()
        .flatten()
        .ok_or(WebError::StorageUnavailable(kind.name()))?;
        Ok(Self { storage, kind })
    }

    #[must_use]
    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    fn is_same_area(&self, event: &StorageEvent) -> bool {
        event.storage_area().is_some_and(|area| {
            let area: &JsValue = area.as_ref();
            area == AsRef::<JsValue>::as_ref(&self.storage)
        })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ColorSchemeError> {
        self.storage
            .get_item(key)
            .map_err(|err| WebError::from(err).into_storage())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ColorSchemeError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| WebError::from(err).into_storage())
    }
}

impl StorageEvents for BrowserStorage {
    /// Listen for `storage` events on `window` that target this area.
    ///
    /// Browsers only fire the event in *other* same-origin contexts, so a
    /// write made through this handle is never reported back to it.
    fn on_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        let window = match crate::window() {
            Ok(window) => window,
            Err(err) => {
                tracing::warn!(error = %err, "storage events unavailable");
                return Subscription::inert();
            }
        };

        let area = self.clone();
        let listener = StorageListener::new(move |event: StorageEvent| {
            if !area.is_same_area(&event) {
                return;
            }
            callback(&StorageChange {
                key: event.key(),
                old_value: event.old_value(),
                new_value: event.new_value(),
            });
        });

        let function = listener.as_ref().unchecked_ref();
        if let Err(err) = window.add_event_listener_with_callback("storage", function) {
            tracing::warn!(error = %WebError::from(err), "failed to listen for storage events");
            return Subscription::inert();
        }

        let kind = self.kind;
        Subscription::new(move || {
            let function = listener.as_ref().unchecked_ref();
            if let Err(err) = window.remove_event_listener_with_callback("storage", function) {
                tracing::warn!(
                    storage = kind.name(),
                    error = %WebError::from(err),
                    "failed to remove storage listener"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_storage_areas_like_the_dom() {
        assert_eq!(StorageKind::Local.name(), "localStorage");
        assert_eq!(StorageKind::Session.name(), "sessionStorage");
    }
}
