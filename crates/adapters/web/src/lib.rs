//! # colorscheme-adapter-web
//!
//! Browser adapter built on [web-sys](https://docs.rs/web-sys).
//!
//! ## Responsibilities
//! - Implement the port traits defined in `colorscheme-app::ports` against
//!   the live browser: `localStorage`, `sessionStorage`, the `storage`
//!   event, `matchMedia`, and `document`
//! - Keep every `wasm-bindgen` closure alive exactly as long as its
//!   subscription
//! - Route `tracing` output to the browser console
//!
//! ## Dependency rule
//! Depends on `colorscheme-app` (for port traits) and `colorscheme-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod console;
mod document;
mod error;
mod media_query;
mod storage;

pub use document::BrowserDocument;
pub use error::WebError;
pub use media_query::BrowserMediaQuery;
pub use storage::{BrowserStorage, StorageKind};

/// The global `window`.
///
/// # Errors
///
/// Returns [`WebError::NoWindow`] outside a browsing context (e.g. in a
/// worker).
pub fn window() -> Result<web_sys::Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}
