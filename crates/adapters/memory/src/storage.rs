//! Shared string storage with per-tab change notifications.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use colorscheme_app::event_bus::{EventBus, Subscription};
use colorscheme_app::ports::{KeyValueStore, StorageChange, StorageEvents};
use colorscheme_domain::error::ColorSchemeError;

use crate::error::MemoryError;

#[derive(Debug, Clone)]
struct Broadcast {
    origin: usize,
    change: StorageChange,
}

#[derive(Default)]
struct Shared {
    items: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<(String, String)>>,
    quota: Option<usize>,
    next_tab: Cell<usize>,
    bus: EventBus<Broadcast>,
}

impl Shared {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        let items = self.items.borrow();
        let others: usize = items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

/// One origin's storage, shared by every tab opened on it.
///
/// Cloning yields another handle to the same area.
#[derive(Clone, Default)]
pub struct StorageArea {
    shared: Rc<Shared>,
}

impl StorageArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An area refusing writes that would exceed `bytes` (keys + values).
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            shared: Rc::new(Shared {
                quota: Some(bytes),
                ..Shared::default()
            }),
        }
    }

    /// A new browsing context on this area.
    #[must_use]
    pub fn open_tab(&self) -> MemoryStorage {
        let tab = self.shared.next_tab.get();
        self.shared.next_tab.set(tab + 1);
        MemoryStorage {
            shared: Rc::clone(&self.shared),
            tab,
        }
    }

    /// Put a value in place without recording a write or notifying tabs,
    /// as if left over from an earlier visit.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.shared
            .items
            .borrow_mut()
            .insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.shared.items.borrow().get(key).cloned()
    }

    /// Every successful write made through any tab, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.shared.writes.borrow().clone()
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.shared.writes.borrow().len()
    }
}

/// One tab's handle on a [`StorageArea`].
///
/// Implements [`StorageEvents`] with browser semantics: a tab is notified of
/// changes made by *other* tabs only, and only when the value changed.
#[derive(Clone)]
pub struct MemoryStorage {
    shared: Rc<Shared>,
    tab: usize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// A single tab on a fresh, private area.
    #[must_use]
    pub fn new() -> Self {
        StorageArea::new().open_tab()
    }

    #[must_use]
    pub fn area(&self) -> StorageArea {
        StorageArea {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn remove_item(&self, key: &str) {
        let old_value = self.shared.items.borrow_mut().remove(key);
        if old_value.is_some() {
            self.broadcast(StorageChange {
                key: Some(key.to_string()),
                old_value,
                new_value: None,
            });
        }
    }

    pub fn clear(&self) {
        let was_empty = {
            let mut items = self.shared.items.borrow_mut();
            let was_empty = items.is_empty();
            items.clear();
            was_empty
        };
        if !was_empty {
            self.broadcast(StorageChange::default());
        }
    }

    fn broadcast(&self, change: StorageChange) {
        tracing::trace!(tab = self.tab, ?change, "broadcasting storage change");
        self.shared.bus.emit(&Broadcast {
            origin: self.tab,
            change,
        });
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ColorSchemeError> {
        Ok(self.shared.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ColorSchemeError> {
        let used = self.shared.used_bytes_with(key, value);
        if let Some(quota) = self.shared.quota.filter(|quota| used > *quota) {
            return Err(MemoryError::QuotaExceeded { quota }.into());
        }

        let old_value = self
            .shared
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.shared
            .writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));

        if old_value.as_deref() != Some(value) {
            self.broadcast(StorageChange {
                key: Some(key.to_string()),
                old_value,
                new_value: Some(value.to_string()),
            });
        }
        Ok(())
    }
}

impl StorageEvents for MemoryStorage {
    fn on_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        let tab = self.tab;
        self.shared.bus.subscribe(move |broadcast: Broadcast| {
            if broadcast.origin != tab {
                callback(&broadcast.change);
            }
        })
    }
}
