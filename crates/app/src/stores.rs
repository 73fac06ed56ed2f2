//! The three scheme stores, from leaf to dependent.

pub mod current;
pub mod preferred;
pub mod system;

#[cfg(test)]
pub(crate) mod fakes;

pub use current::CurrentColorSchemeStorage;
pub use preferred::PreferredSchemeStorage;
pub use system::SystemSchemeStorage;
