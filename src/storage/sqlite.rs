//! SQLite-backed key-value store.
//!
//! Slots live in the `kv_slots` table created by the database migrations.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::KeyValueStore;
use crate::database::Database;
use crate::types::errors::PersistenceError;

pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Wraps an already opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let db = Database::open(path).map_err(|e| PersistenceError::Read(e.to_string()))?;
        Ok(Self::new(db))
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let db = Database::open_in_memory().map_err(|e| PersistenceError::Read(e.to_string()))?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PersistenceError::Read(e.to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.db
            .connection()
            .execute(
                "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().timestamp()],
            )
            .map_err(|e| PersistenceError::Write(e.to_string()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.db
            .connection()
            .execute("DELETE FROM kv_slots WHERE key = ?1", params![key])
            .map_err(|e| PersistenceError::Write(e.to_string()))?;
        Ok(())
    }
}
