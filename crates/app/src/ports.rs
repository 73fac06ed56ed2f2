//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the stores and the browser. They are
//! defined here (in `app`) so that both the stores and the adapters can
//! depend on them without creating circular dependencies.

pub mod document;
pub mod media_query;
pub mod storage;

pub use document::Document;
pub use media_query::MediaQuery;
pub use storage::{KeyValueStore, StorageChange, StorageEvents};
