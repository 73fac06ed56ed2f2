//! Storage port — string key-value stores and their change notifications.

use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;

use crate::event_bus::Subscription;

/// A string key-value store such as `localStorage` or `sessionStorage`.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Storage`] when the backing store is
    /// unavailable.
    fn get_item(&self, key: &str) -> Result<Option<String>, ColorSchemeError>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorSchemeError::Storage`] when the write is refused
    /// (quota, privacy mode, …).
    fn set_item(&self, key: &str, value: &str) -> Result<(), ColorSchemeError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, ColorSchemeError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ColorSchemeError> {
        (**self).set_item(key, value)
    }
}

/// A write made to a shared store by *another* browsing context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageChange {
    /// The changed key; `None` when the whole store was cleared.
    pub key: Option<String>,
    pub old_value: Option<String>,
    /// The value after the change; `None` when the key was removed.
    pub new_value: Option<String>,
}

impl StorageChange {
    /// Whether this change touches `key` (a clear touches every key).
    #[must_use]
    pub fn affects(&self, key: &str) -> bool {
        self.key.as_deref().is_none_or(|changed| changed == key)
    }
}

/// Source of cross-context storage notifications (the `storage` event).
pub trait StorageEvents {
    /// Register `callback` for every external change. Dropping the returned
    /// handle removes the native listener.
    fn on_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription;
}

impl<T: StorageEvents + ?Sized> StorageEvents for Rc<T> {
    fn on_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        (**self).on_storage_change(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_affect_matching_key_only() {
        let change = StorageChange {
            key: Some("preferred".to_string()),
            old_value: None,
            new_value: Some("dark".to_string()),
        };
        assert!(change.affects("preferred"));
        assert!(!change.affects("current"));
    }

    #[test]
    fn should_affect_every_key_when_cleared() {
        let change = StorageChange::default();
        assert!(change.affects("preferred"));
        assert!(change.affects("anything"));
    }
}
