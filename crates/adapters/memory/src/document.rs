//! Recording document.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use colorscheme_app::ports::Document;
use colorscheme_domain::error::ColorSchemeError;
use colorscheme_domain::theme::MetaTag;

use crate::error::MemoryError;

/// A document that stores every mutation for later inspection.
///
/// Elements are addressed by an id string.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    root: RefCell<HashMap<String, String>>,
    elements: RefCell<HashMap<String, HashMap<String, String>>>,
    metas: RefCell<Vec<MetaTag>>,
    styles: RefCell<Vec<String>>,
    read_only: Cell<bool>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later mutation fail with [`MemoryError::ReadOnlyDocument`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.borrow().get(name).cloned()
    }

    #[must_use]
    pub fn element_attribute(&self, element: &str, name: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(element)
            .and_then(|attrs| attrs.get(name))
            .cloned()
    }

    #[must_use]
    pub fn meta_tags(&self) -> Vec<MetaTag> {
        self.metas.borrow().clone()
    }

    #[must_use]
    pub fn style_rules(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    fn writable(&self) -> Result<(), ColorSchemeError> {
        if self.read_only.get() {
            return Err(MemoryError::ReadOnlyDocument.into());
        }
        Ok(())
    }
}

impl Document for MemoryDocument {
    type Element = String;

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ColorSchemeError> {
        self.writable()?;
        self.root
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_element_attribute(
        &self,
        element: &String,
        name: &str,
        value: &str,
    ) -> Result<(), ColorSchemeError> {
        self.writable()?;
        self.elements
            .borrow_mut()
            .entry(element.clone())
            .or_default()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn append_meta(&self, tag: &MetaTag) -> Result<(), ColorSchemeError> {
        self.writable()?;
        self.metas.borrow_mut().push(tag.clone());
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<(), ColorSchemeError> {
        self.writable()?;
        self.styles.borrow_mut().push(css.to_string());
        Ok(())
    }
}
