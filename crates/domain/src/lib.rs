//! # colorscheme-domain
//!
//! Pure domain model for the colorscheme preference resolver.
//!
//! ## Responsibilities
//! - Define **schemes**: the concrete [`ColorScheme`](scheme::ColorScheme)
//!   (`dark`/`light`) and the persisted
//!   [`PreferredScheme`](scheme::PreferredScheme) (`dark`/`light`/`auto`)
//! - Define **theme tokens** written to the document and the `theme-color`
//!   meta tags
//! - Own the error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or browser crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod scheme;
pub mod theme;
