//! Minimal in-test port implementations shared by the store tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use colorscheme_domain::error::ColorSchemeError;

use crate::event_bus::{EventBus, Subscription};
use crate::ports::{KeyValueStore, MediaQuery, StorageChange, StorageEvents};

#[derive(Default)]
pub(crate) struct FakeStore {
    items: RefCell<HashMap<String, String>>,
    pub(crate) writes: RefCell<Vec<(String, String)>>,
    pub(crate) fail_writes: Cell<bool>,
}

impl FakeStore {
    pub(crate) fn with(key: &str, value: &str) -> Rc<Self> {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Rc::new(store)
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub(crate) fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl KeyValueStore for FakeStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ColorSchemeError> {
        Ok(self.value(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ColorSchemeError> {
        if self.fail_writes.get() {
            return Err(ColorSchemeError::Storage(Box::new(std::io::Error::other(
                "quota exceeded",
            ))));
        }
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeEvents {
    bus: EventBus<StorageChange>,
}

impl FakeEvents {
    pub(crate) fn fire(&self, key: &str, new_value: Option<&str>) {
        self.bus.emit(&StorageChange {
            key: Some(key.to_string()),
            old_value: None,
            new_value: new_value.map(str::to_string),
        });
    }
}

impl StorageEvents for FakeEvents {
    fn on_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        self.bus.subscribe(move |change| callback(&change))
    }
}

#[derive(Default)]
pub(crate) struct FakeMedia {
    matches: Cell<bool>,
    bus: EventBus<bool>,
}

impl FakeMedia {
    pub(crate) fn dark() -> Rc<Self> {
        let media = Self::default();
        media.matches.set(true);
        Rc::new(media)
    }

    pub(crate) fn light() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn set(&self, matches: bool) {
        if self.matches.replace(matches) != matches {
            self.bus.emit(&matches);
        }
    }

    pub(crate) fn listeners(&self) -> usize {
        self.bus.len()
    }
}

impl MediaQuery for FakeMedia {
    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn on_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        self.bus.subscribe(callback)
    }
}
