//! In-process backend for tests and dry runs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use super::{Collection, CollectionStore};
use crate::error::PersistenceError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<Collection, String>>,
    quarantined: RefCell<HashMap<Collection, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw text, as if it had been written earlier.
    pub fn with_raw(self, collection: Collection, content: impl Into<String>) -> Self {
        self.collections
            .borrow_mut()
            .insert(collection, content.into());
        self
    }

    pub fn raw(&self, collection: Collection) -> Option<String> {
        self.collections.borrow().get(&collection).cloned()
    }

    pub fn quarantined(&self, collection: Collection) -> Option<String> {
        self.quarantined.borrow().get(&collection).cloned()
    }

    /// Make every following write fail, to exercise error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl CollectionStore for MemoryStore {
    fn read_raw(&self, collection: Collection) -> std::io::Result<Option<String>> {
        Ok(self.raw(collection))
    }

    fn write_raw(&self, collection: Collection, content: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Write {
                path: PathBuf::from(format!("memory://{}", collection.file_name())),
                source: std::io::Error::new(std::io::ErrorKind::Other, "writes disabled"),
            });
        }
        self.collections
            .borrow_mut()
            .insert(collection, content.to_string());
        Ok(())
    }

    fn quarantine(&self, collection: Collection, content: &str) {
        self.quarantined
            .borrow_mut()
            .insert(collection, content.to_string());
    }
}
