//! Runtime settings consumed by [`ColorModeController`](crate::controller::ColorModeController).

use colorscheme_domain::theme::{ThemeColors, ThemeNames};

/// Durable key holding the preferred scheme.
pub const DEFAULT_PREFERRED_KEY: &str = "color-scheme-preferred";

/// Session key holding the current scheme.
pub const DEFAULT_CURRENT_KEY: &str = "color-scheme-current";

/// Root attribute toggled by Bootstrap's color modes.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Everything the controller needs besides its ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub preferred_key: String,
    pub current_key: String,
    /// Attribute written on the document root.
    pub attribute: String,
    pub theme_names: ThemeNames,
    /// When set, `theme-color` meta tags are appended at start-up.
    pub meta_colors: Option<ThemeColors>,
    /// Inject the dual-scheme style rule for form controls at start-up.
    pub adapt_inputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preferred_key: DEFAULT_PREFERRED_KEY.to_string(),
            current_key: DEFAULT_CURRENT_KEY.to_string(),
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            theme_names: ThemeNames::default(),
            meta_colors: None,
            adapt_inputs: false,
        }
    }
}
