//! In-memory key-value store.
//!
//! Used for the `memory` backend and as the test fake: slots can be seeded
//! with arbitrary raw text and reads or writes can be made to fail.

use std::collections::HashMap;

use super::KeyValueStore;
use crate::types::errors::PersistenceError;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot already holding `raw`.
    pub fn with_slot(key: &str, raw: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), raw.to_string());
        store
    }

    /// Makes every subsequent `read` fail.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `write` fail, as a full disk or quota would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw slot contents, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads {
            return Err(PersistenceError::Read(format!("slot '{}' is unavailable", key)));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Write(format!("quota exceeded for slot '{}'", key)));
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.slots.remove(key);
        Ok(())
    }
}
