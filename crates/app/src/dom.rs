//! DOM application helpers — write the resolved theme into a [`Document`].

use std::cell::Cell;

use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::theme::ThemeColors;

use crate::ports::Document;

/// Style rule letting native form controls render in both schemes.
pub const INPUT_COLOR_SCHEME_CSS: &str =
    "input, select, textarea, button { color-scheme: light dark; }";

/// Set `attribute` on the document root to `theme`. The token is not
/// validated.
///
/// # Errors
///
/// Propagates [`ColorSchemeError::Document`] from the port.
pub fn apply_theme<D: Document>(
    document: &D,
    attribute: &str,
    theme: &str,
) -> Result<(), ColorSchemeError> {
    document.set_root_attribute(attribute, theme)
}

/// Set `attribute` on a single element to `theme`.
///
/// # Errors
///
/// Propagates [`ColorSchemeError::Document`] from the port.
pub fn apply_theme_to_element<D: Document>(
    document: &D,
    element: &D::Element,
    attribute: &str,
    theme: &str,
) -> Result<(), ColorSchemeError> {
    document.set_element_attribute(element, attribute, theme)
}

/// Append one `theme-color` meta tag per scheme, keyed by media query.
///
/// # Errors
///
/// Propagates [`ColorSchemeError::Document`] from the port.
pub fn add_meta_theme_colors<D: Document>(
    document: &D,
    colors: &ThemeColors,
) -> Result<(), ColorSchemeError> {
    for tag in colors.meta_tags() {
        document.append_meta(&tag)?;
    }
    Ok(())
}

/// Owns a document and the theme attribute name, and remembers whether the
/// input style rule was already injected.
pub struct ThemeApplier<D> {
    document: D,
    attribute: String,
    inputs_adapted: Cell<bool>,
}

impl<D: Document> ThemeApplier<D> {
    #[must_use]
    pub fn new(document: D, attribute: impl Into<String>) -> Self {
        Self {
            document,
            attribute: attribute.into(),
            inputs_adapted: Cell::new(false),
        }
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port.
    pub fn apply(&self, theme: &str) -> Result<(), ColorSchemeError> {
        apply_theme(&self.document, &self.attribute, theme)
    }

    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port.
    pub fn apply_to_element(
        &self,
        element: &D::Element,
        theme: &str,
    ) -> Result<(), ColorSchemeError> {
        apply_theme_to_element(&self.document, element, &self.attribute, theme)
    }

    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port.
    pub fn add_meta_theme_colors(&self, colors: &ThemeColors) -> Result<(), ColorSchemeError> {
        add_meta_theme_colors(&self.document, colors)
    }

    /// Inject [`INPUT_COLOR_SCHEME_CSS`] once; later calls do nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`ColorSchemeError::Document`] from the port. The flag is
    /// only set after a successful injection, so a failed call can be
    /// retried.
    pub fn adapt_inputs_to_preferred_scheme(&self) -> Result<(), ColorSchemeError> {
        if self.inputs_adapted.get() {
            return Ok(());
        }
        self.document.append_style(INPUT_COLOR_SCHEME_CSS)?;
        self.inputs_adapted.set(true);
        Ok(())
    }
}
