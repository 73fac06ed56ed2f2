//! Configuration loading — TOML or JSON text handed over by the page.
//!
//! Every field has a sensible default so the configuration is optional.
//! JavaScript callers usually pass a JSON object; a string starting with
//! `{` is read as JSON, anything else as TOML.

use colorscheme_app::settings::{
    DEFAULT_CURRENT_KEY, DEFAULT_PREFERRED_KEY, DEFAULT_THEME_ATTRIBUTE, Settings,
};
use colorscheme_domain::theme::{ThemeColors, ThemeNames};
use serde::Deserialize;

/// Log filter used when none is configured or the configured one is invalid.
pub const DEFAULT_LOG_FILTER: &str = "colorscheme=info";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage keys.
    pub storage: StorageConfig,
    /// Theme attribute and names.
    pub theme: ThemeConfig,
    /// `theme-color` meta tags.
    pub meta: MetaConfig,
    /// Form control styling.
    pub inputs: InputsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Keys under which schemes are persisted.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Durable (`localStorage`) key for the preferred scheme.
    pub preferred_key: String,
    /// Session (`sessionStorage`) key for the current scheme.
    pub current_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Attribute written on `<html>`.
    pub attribute: String,
    /// `dark` and `light` tokens, next to `attribute` in the section.
    #[serde(flatten)]
    pub names: ThemeNames,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Append the two `theme-color` meta tags at start-up.
    pub enabled: bool,
    /// `light` and `dark` colors.
    #[serde(flatten)]
    pub colors: ThemeColors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Let form controls follow the preferred scheme.
    pub adapt: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or fails validation.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let trimmed = text.trim_start();
        let config = if trimmed.starts_with('{') {
            Self::from_json(trimmed)?
        } else {
            Self::from_toml(trimmed)?
        };
        config.validate()?;
        Ok(config)
    }

    fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Json)
    }

    fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Toml)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.preferred_key.is_empty() || self.storage.current_key.is_empty() {
            return Err(ConfigError::Validation(
                "storage keys must be non-empty".to_string(),
            ));
        }
        if self.storage.preferred_key == self.storage.current_key {
            return Err(ConfigError::Validation(format!(
                "preferred and current keys must differ, both are `{}`",
                self.storage.preferred_key
            )));
        }
        if self.theme.attribute.is_empty() {
            return Err(ConfigError::Validation(
                "theme attribute must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert into the controller's settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            preferred_key: self.storage.preferred_key.clone(),
            current_key: self.storage.current_key.clone(),
            attribute: self.theme.attribute.clone(),
            theme_names: self.theme.names.clone(),
            meta_colors: self.meta.enabled.then(|| self.meta.colors.clone()),
            adapt_inputs: self.inputs.adapt,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preferred_key: DEFAULT_PREFERRED_KEY.to_string(),
            current_key: DEFAULT_CURRENT_KEY.to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            names: ThemeNames::default(),
        }
    }
}


impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse TOML config")]
    Toml(#[source] toml::de::Error),
    /// JSON parse failure.
    #[error("failed to parse JSON config")]
    Json(#[source] serde_json::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
