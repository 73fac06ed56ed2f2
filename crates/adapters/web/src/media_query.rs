//! `window.matchMedia` adapter.

use colorscheme_app::event_bus::Subscription;
use colorscheme_app::ports::MediaQuery;
use colorscheme_domain::theme::PREFERS_DARK_QUERY;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::error::WebError;

type ChangeListener = Closure<dyn FnMut(MediaQueryListEvent)>;

/// A live `MediaQueryList`.
#[derive(Debug, Clone)]
pub struct BrowserMediaQuery {
    list: MediaQueryList,
}

impl BrowserMediaQuery {
    /// Evaluate `query` against the current window.
    ///
    /// # Errors
    ///
    /// Fails without a window, or when the browser rejects the query.
    pub fn new(query: &str) -> Result<Self, WebError> {
        let list = crate::window()?
            .match_media(query)?
            .ok_or_else(|| WebError::UnsupportedMediaQuery(query.to_string()))?;
        Ok(Self { list })
    }

    /// `(prefers-color-scheme: dark)`.
    ///
    /// # Errors
    ///
    /// See [`BrowserMediaQuery::new`].
    pub fn prefers_dark() -> Result<Self, WebError> {
        Self::new(PREFERS_DARK_QUERY)
    }

    #[must_use]
    pub fn media(&self) -> String {
        self.list.media()
    }
}

impl MediaQuery for BrowserMediaQuery {
    fn matches(&self) -> bool {
        self.list.matches()
    }

    fn on_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        let listener = ChangeListener::new(move |event: MediaQueryListEvent| {
            callback(event.matches());
        });

        let list = self.list.clone();
        let function = listener.as_ref().unchecked_ref();
        if let Err(err) = list.add_event_listener_with_callback("change", function) {
            tracing::warn!(
                media = %list.media(),
                error = %WebError::from(err),
                "failed to listen for media query changes"
            );
            return Subscription::inert();
        }

        Subscription::new(move || {
            let function = listener.as_ref().unchecked_ref();
            if let Err(err) = list.remove_event_listener_with_callback("change", function) {
                tracing::warn!(
                    error = %WebError::from(err),
                    "failed to remove media query listener"
                );
            }
        })
    }
}
