//! Live DOM adapter.

use colorscheme_app::ports::Document;
use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::theme::MetaTag;
use web_sys::Element;

use crate::error::WebError;

/// The window's `document`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    /// # Errors
    ///
    /// Fails without a window or document.
    pub fn current() -> Result<Self, WebError> {
        let document = crate::window()?.document().ok_or(WebError::NoDocument)?;
        Ok(Self { document })
    }

    #[must_use]
    pub fn from_document(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn root(&self) -> Result<Element, WebError> {
        self.document
            .document_element()
            .ok_or(WebError::MissingElement("root"))
    }

    fn append_to_head(&self, element: &Element) -> Result<(), WebError> {
        let head = self
            .document
            .head()
            .ok_or(WebError::MissingElement("head"))?;
        head.append_child(element)?;
        Ok(())
    }

    fn meta_element(&self, tag: &MetaTag) -> Result<Element, WebError> {
        let meta = self.document.create_element("meta")?;
        meta.set_attribute("name", &tag.name)?;
        meta.set_attribute("media", &tag.media)?;
        meta.set_attribute("content", &tag.content)?;
        Ok(meta)
    }
}

impl Document for BrowserDocument {
    type Element = Element;

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ColorSchemeError> {
        self.root()
            .and_then(|root| root.set_attribute(name, value).map_err(WebError::from))
            .map_err(WebError::into_document)
    }

    fn set_element_attribute(
        &self,
        element: &Element,
        name: &str,
        value: &str,
    ) -> Result<(), ColorSchemeError> {
        element
            .set_attribute(name, value)
            .map_err(|err| WebError::from(err).into_document())
    }

    fn append_meta(&self, tag: &MetaTag) -> Result<(), ColorSchemeError> {
        self.meta_element(tag)
            .and_then(|meta| self.append_to_head(&meta))
            .map_err(WebError::into_document)
    }

    fn append_style(&self, css: &str) -> Result<(), ColorSchemeError> {
        let rule = self
            .document
            .create_element("style")
            .map_err(|err| WebError::from(err).into_document())?;
        rule.set_text_content(Some(css));
        self.append_to_head(&rule).map_err(WebError::into_document)
    }
}
