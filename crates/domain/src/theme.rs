//! Theme tokens written to the DOM and the `theme-color` meta tags.

use serde::Deserialize;

use crate::scheme::ColorScheme;

/// Media query matching an environment that prefers a dark scheme.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Media query matching an environment that prefers a light scheme.
pub const PREFERS_LIGHT_QUERY: &str = "(prefers-color-scheme: light)";

/// Theme token written for each concrete scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeNames {
    pub dark: String,
    pub light: String,
}

impl Default for ThemeNames {
    fn default() -> Self {
        Self {
            dark: ColorScheme::Dark.to_string(),
            light: ColorScheme::Light.to_string(),
        }
    }
}

impl ThemeNames {
    /// The token configured for `scheme`.
    #[must_use]
    pub fn for_scheme(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Dark => &self.dark,
            ColorScheme::Light => &self.light,
        }
    }
}

/// Browser UI colors advertised through `<meta name="theme-color">`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub light: String,
    pub dark: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            light: "#ffffff".to_string(),
            dark: "#212529".to_string(),
        }
    }
}

impl ThemeColors {
    /// The light tag followed by the dark tag.
    #[must_use]
    pub fn meta_tags(&self) -> [MetaTag; 2] {
        [
            MetaTag::theme_color(PREFERS_LIGHT_QUERY, &self.light),
            MetaTag::theme_color(PREFERS_DARK_QUERY, &self.dark),
        ]
    }
}

/// A `<meta>` element to append to the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: String,
    pub media: String,
    pub content: String,
}

impl MetaTag {
    #[must_use]
    pub fn theme_color(media: &str, content: &str) -> Self {
        Self {
            name: "theme-color".to_string(),
            media: media.to_string(),
            content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_theme_names_to_scheme_literals() {
        let names = ThemeNames::default();
        assert_eq!(names.for_scheme(ColorScheme::Dark), "dark");
        assert_eq!(names.for_scheme(ColorScheme::Light), "light");
    }

    #[test]
    fn should_return_configured_theme_name() {
        let names = ThemeNames {
            dark: "midnight".to_string(),
            light: "paper".to_string(),
        };
        assert_eq!(names.for_scheme(ColorScheme::Dark), "midnight");
        assert_eq!(names.for_scheme(ColorScheme::Light), "paper");
    }

    #[test]
    fn should_build_light_then_dark_meta_tags() {
        let [light, dark] = ThemeColors::default().meta_tags();
        assert_eq!(light.name, "theme-color");
        assert_eq!(light.media, "(prefers-color-scheme: light)");
        assert_eq!(light.content, "#ffffff");
        assert_eq!(dark.media, "(prefers-color-scheme: dark)");
        assert_eq!(dark.content, "#212529");
    }

    #[test]
    fn should_fill_missing_theme_name_with_default() {
        let names: ThemeNames = serde_json::from_str(r#"{"dark":"night"}"#).unwrap();
        assert_eq!(names.dark, "night");
        assert_eq!(names.light, "light");
    }
}
