//! Prep-kit checklist persistence
//!
//! Each checkbox's state is stored under its identifier as the string
//! `"true"` or `"false"`.

use std::collections::HashMap;
use std::sync::RwLock;

/// String key/value persistence, e.g. browser local storage
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// A checkbox on the prep-kit page
pub trait Checkbox {
    fn id(&self) -> &str;
    fn set_checked(&mut self, checked: bool);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
    }
}

/// Plain checkbox record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            checked: false,
        }
    }
}

impl Checkbox for ChecklistItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

pub struct Checklist<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> Checklist<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.storage.get_item(id).as_deref() == Some("true")
    }

    /// Record a checkbox change
    pub fn toggle(&self, id: &str, checked: bool) {
        tracing::trace!(id, checked, "Checklist item changed");
        self.storage
            .set_item(id, if checked { "true" } else { "false" });
    }

    /// Apply stored state to the page's checkboxes
    pub fn restore<C: Checkbox>(&self, checkboxes: &mut [C]) {
        for checkbox in checkboxes.iter_mut() {
            let checked = self.is_checked(checkbox.id());
            checkbox.set_checked(checked);
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
