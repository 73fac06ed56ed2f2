//! Scheme values: the concrete two-state [`ColorScheme`] and the three-state
//! [`PreferredScheme`] a user can persist.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidSchemeError, SchemeSet};

/// A concrete light/dark mode. Never `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    /// Map the "prefers dark" media-feature match state to a scheme.
    #[must_use]
    pub fn from_prefers_dark(matches: bool) -> Self {
        if matches { Self::Dark } else { Self::Light }
    }

    /// The opposite scheme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Lowercase literal used in storage and the DOM.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = InvalidSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(InvalidSchemeError::new(other, SchemeSet::Concrete)),
        }
    }
}

/// The user's persisted choice. `Auto` defers to the system scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreferredScheme {
    Dark,
    Light,
    #[default]
    Auto,
}

impl PreferredScheme {
    /// The concrete scheme this preference names, or `None` for `Auto`.
    #[must_use]
    pub fn concrete(self) -> Option<ColorScheme> {
        match self {
            Self::Dark => Some(ColorScheme::Dark),
            Self::Light => Some(ColorScheme::Light),
            Self::Auto => None,
        }
    }

    /// Parse a raw persisted value, falling back to `Auto` for anything
    /// missing or outside the accepted set.
    #[must_use]
    pub fn coerce(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }

    /// Resolve to a concrete scheme, consulting `system` only for `Auto`.
    #[must_use]
    pub fn resolve(self, system: impl FnOnce() -> ColorScheme) -> ColorScheme {
        self.concrete().unwrap_or_else(system)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Auto => "auto",
        }
    }
}

impl From<ColorScheme> for PreferredScheme {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self::Dark,
            ColorScheme::Light => Self::Light,
        }
    }
}

impl fmt::Display for PreferredScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferredScheme {
    type Err = InvalidSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "auto" => Ok(Self::Auto),
            other => Err(InvalidSchemeError::new(other, SchemeSet::WithAuto)),
        }
    }
}
