//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ColorSchemeError`] via `From` at the port boundary.

use std::fmt;

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum ColorSchemeError {
    /// A caller passed a value outside the accepted scheme set.
    #[error(transparent)]
    InvalidScheme(#[from] InvalidSchemeError),

    /// A key-value store (durable or session) failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The document could not be mutated.
    #[error("document error")]
    Document(#[source] BoxError),
}

/// Which set of scheme values a parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeSet {
    /// `dark` or `light`.
    Concrete,
    /// `dark`, `light` or `auto`.
    WithAuto,
}

impl SchemeSet {
    /// Accepted literal values, in display order.
    #[must_use]
    pub fn values(self) -> &'static [&'static str] {
        match self {
            Self::Concrete => &["dark", "light"],
            Self::WithAuto => &["dark", "light", "auto"],
        }
    }
}

impl fmt::Display for SchemeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values().join(", "))
    }
}

/// Raised when a string does not name an accepted scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color scheme `{value}`, expected one of: {accepted}")]
pub struct InvalidSchemeError {
    /// The rejected input.
    pub value: String,
    /// The set the input was checked against.
    pub accepted: SchemeSet,
}

impl InvalidSchemeError {
    pub(crate) fn new(value: &str, accepted: SchemeSet) -> Self {
        Self {
            value: value.to_string(),
            accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_accepted_set_in_message() {
        let err = InvalidSchemeError::new("blue", SchemeSet::WithAuto);
        assert_eq!(
            err.to_string(),
            "invalid color scheme `blue`, expected one of: dark, light, auto"
        );
    }

    #[test]
    fn should_name_concrete_set_in_message() {
        let err = InvalidSchemeError::new("auto", SchemeSet::Concrete);
        assert_eq!(
            err.to_string(),
            "invalid color scheme `auto`, expected one of: dark, light"
        );
    }

    #[test]
    fn should_forward_message_through_top_level_error() {
        let err: ColorSchemeError = InvalidSchemeError::new("", SchemeSet::Concrete).into();
        assert!(matches!(err, ColorSchemeError::InvalidScheme(_)));
        assert_eq!(
            err.to_string(),
            "invalid color scheme ``, expected one of: dark, light"
        );
    }

    #[test]
    fn should_keep_storage_source() {
        let io = std::io::Error::other("quota exceeded");
        let err = ColorSchemeError::Storage(Box::new(io));
        assert_eq!(err.to_string(), "storage error");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("quota exceeded"));
    }
}
