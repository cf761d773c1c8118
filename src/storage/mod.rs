// Bookmark organizer storage backends
// Each backend is a named-slot key-value store; the persistence adapter decides what goes in a slot.

pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::types::errors::PersistenceError;

/// Trait defining a durable key-value slot store.
pub trait KeyValueStore {
    /// Returns the slot contents, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Replaces the slot contents.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Removes the slot. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
