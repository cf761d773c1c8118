//! Persistence adapter for the bookmark collection.
//!
//! The whole collection lives in one named slot as a JSON array of records.
//! Loading never fails outward: a missing, empty, unreadable, or corrupt slot
//! yields an empty collection and a warning in the log. Saving replaces the
//! slot and reports failures to the caller.

use log::{debug, warn};

use crate::storage::KeyValueStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::PersistenceError;

/// Trait defining load/save of the bookmark collection.
pub trait PersistenceAdapter {
    /// Reads the stored collection, reporting why it could not be read.
    fn try_load(&self) -> Result<Vec<Bookmark>, PersistenceError>;

    /// Overwrites the stored collection with `bookmarks`.
    fn save(&mut self, bookmarks: &[Bookmark]) -> Result<(), PersistenceError>;

    /// Reads the stored collection, falling back to an empty one on any failure.
    fn load(&self) -> Vec<Bookmark> {
        match self.try_load() {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                warn!("starting with an empty bookmark collection: {}", e);
                Vec::new()
            }
        }
    }
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<P> {
    fn try_load(&self) -> Result<Vec<Bookmark>, PersistenceError> {
        (**self).try_load()
    }

    fn save(&mut self, bookmarks: &[Bookmark]) -> Result<(), PersistenceError> {
        (**self).save(bookmarks)
    }

    fn load(&self) -> Vec<Bookmark> {
        (**self).load()
    }
}

/// Stores the collection as JSON under one key of a [`KeyValueStore`].
pub struct SlotPersistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SlotPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the backing store, e.g. to inspect a test fake.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: KeyValueStore> PersistenceAdapter for SlotPersistence<S> {
    fn try_load(&self) -> Result<Vec<Bookmark>, PersistenceError> {
        let raw = match self.store.read(&self.key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bookmarks: Vec<Bookmark> =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        debug!("loaded {} bookmarks from slot '{}'", bookmarks.len(), self.key);
        Ok(bookmarks)
    }

    fn save(&mut self, bookmarks: &[Bookmark]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(bookmarks)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        self.store.write(&self.key, &json)?;
        debug!("saved {} bookmarks to slot '{}'", bookmarks.len(), self.key);
        Ok(())
    }
}
