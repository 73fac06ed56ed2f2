//! # colorscheme-adapter-memory
//!
//! In-memory implementations of every port, for tests and native embedders.
//!
//! ## Provided adapters
//!
//! | Port | Adapter | Behaviour |
//! |------|---------|-----------|
//! | `KeyValueStore` + `StorageEvents` | [`MemoryStorage`] | One tab's view of a shared [`StorageArea`]; writes notify the *other* tabs |
//! | `MediaQuery` | [`MemoryMediaQuery`] | Match state flipped by hand with [`set_matches`](MemoryMediaQuery::set_matches) |
//! | `Document` | [`MemoryDocument`] | Records attributes, meta tags and style rules |
//!
//! ## Dependency rule
//!
//! Depends on `colorscheme-app` (port traits) and `colorscheme-domain` only.

mod document;
mod error;
mod media_query;
mod storage;

pub use document::MemoryDocument;
pub use error::MemoryError;
pub use media_query::MemoryMediaQuery;
pub use storage::{MemoryStorage, StorageArea};
