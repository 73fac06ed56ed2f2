//! Document port — the handful of DOM mutations the theme helpers need.

use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::theme::MetaTag;

/// A mutable document.
///
/// Every method may fail with [`ColorSchemeError::Document`] when the
/// underlying DOM call is rejected.
pub trait Document {
    /// Handle to an element of this document.
    type Element;

    /// Set `name="value"` on the root (`<html>`) element.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Document`] when the DOM rejects the attribute.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ColorSchemeError>;

    /// Set `name="value"` on `element`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Document`] when the DOM rejects the attribute.
    fn set_element_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), ColorSchemeError>;

    /// Append a `<meta>` element to the document head.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Document`] when the DOM rejects the element.
    fn append_meta(&self, tag: &MetaTag) -> Result<(), ColorSchemeError>;

    /// Append a `<style>` element containing `css` to the document head.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Document`] when the DOM rejects the element.
    fn append_style(&self, css: &str) -> Result<(), ColorSchemeError>;
}

impl<T: Document + ?Sized> Document for Rc<T> {
    type Element = T::Element;

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ColorSchemeError> {
        (**self).set_root_attribute(name, value)
    }

    fn set_element_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), ColorSchemeError> {
        (**self).set_element_attribute(element, name, value)
    }

    fn append_meta(&self, tag: &MetaTag) -> Result<(), ColorSchemeError> {
        (**self).append_meta(tag)
    }

    fn append_style(&self, css: &str) -> Result<(), ColorSchemeError> {
        (**self).append_style(css)
    }
}
