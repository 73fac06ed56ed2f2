//! # colorscheme-app
//!
//! Application layer — the scheme stores and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `KeyValueStore` — durable and session string storage
//!   - `StorageEvents` — writes made by other browsing contexts
//!   - `MediaQuery` — the "prefers dark" environment signal
//!   - `Document` — root attribute, meta tags, style rules
//! - Provide the three stores and the resolution cascade:
//!   - `SystemSchemeStorage` — what the environment prefers
//!   - `PreferredSchemeStorage` — what the user saved (`dark`/`light`/`auto`)
//!   - `CurrentColorSchemeStorage` — what this session displays
//! - Provide the DOM helpers and the `ColorModeController` that wires it all
//! - Provide a typed in-process event bus with unsubscribe handles
//!
//! ## Dependency rule
//! Depends on `colorscheme-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod controller;
pub mod dom;
pub mod event_bus;
pub mod ports;
pub mod settings;
pub mod stores;
