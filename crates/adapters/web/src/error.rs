//! Browser adapter error types.

use colorscheme_domain::error::ColorSchemeError;
use wasm_bindgen::JsValue;

/// Errors originating from browser APIs.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// There is no global `window` (worker or non-browser host).
    #[error("no global window object")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// The document has no root or head element.
    #[error("document has no {0} element")]
    MissingElement(&'static str),

    /// The storage area is disabled (privacy mode, sandboxed frame, …).
    #[error("{0} is unavailable")]
    StorageUnavailable(&'static str),

    /// `matchMedia` returned nothing for the query.
    #[error("media query `{0}` is not supported")]
    UnsupportedMediaQuery(String),

    /// A browser API threw.
    #[error("browser API threw: {0}")]
    Js(String),
}

impl WebError {
    /// Wrap as [`ColorSchemeError::Storage`].
    #[must_use]
    pub fn into_storage(self) -> ColorSchemeError {
        ColorSchemeError::Storage(Box::new(self))
    }

    /// Wrap as [`ColorSchemeError::Document`].
    #[must_use]
    pub fn into_document(self) -> ColorSchemeError {
        ColorSchemeError::Document(Box::new(self))
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
