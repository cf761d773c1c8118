//! App core for the bookmark organizer.
//!
//! Wires the configured storage backend into the bookmark store and holds the
//! transient UI-facing state: the editing session, the list filter and the
//! memoized tag index.

use std::fs;

use log::info;

use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::editing_session::EditingSession;
use crate::platform;
use crate::services::derived_views::{self, TagIndex};
use crate::services::persistence::{PersistenceAdapter, SlotPersistence};
use crate::storage::{JsonFileStore, MemoryStore, SqliteStore};
use crate::types::bookmark::Bookmark;
use crate::types::errors::PersistenceError;
use crate::types::filter::FilterState;
use crate::types::settings::{OrganizerSettings, StorageBackend};

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "bookmarks.db";

/// Central application struct.
pub struct App {
    pub settings: OrganizerSettings,
    pub store: BookmarkStore,
    pub editing: EditingSession,
    pub filter: FilterState,
    tag_index: TagIndex,
}

impl App {
    /// Builds the storage backend named in `settings` and opens the store on it.
    ///
    /// # Errors
    /// Returns `PersistenceError` only when the backend itself cannot be
    /// created (e.g. the database file cannot be opened). Unreadable slot
    /// contents never fail here.
    pub fn new(settings: OrganizerSettings) -> Result<Self, PersistenceError> {
        let persistence = build_persistence(&settings)?;
        let mut app = Self::with_persistence(persistence);
        app.settings = settings;
        Ok(app)
    }

    /// Creates an app over an explicit persistence adapter with default settings.
    pub fn with_persistence(persistence: Box<dyn PersistenceAdapter>) -> Self {
        Self {
            settings: OrganizerSettings::default(),
            store: BookmarkStore::open(persistence),
            editing: EditingSession::new(),
            filter: FilterState::default(),
            tag_index: TagIndex::new(),
        }
    }

    /// Sorted distinct tags, recomputed only after the store changes.
    pub fn distinct_tags(&mut self) -> &[String] {
        self.tag_index.get(self.store.version(), self.store.list())
    }

    /// The store's bookmarks narrowed by the current filter state.
    pub fn visible_bookmarks(&self) -> Vec<&Bookmark> {
        derived_views::apply_filter(self.store.list(), &self.filter)
    }
}

/// Creates the persistence adapter described by `settings.storage`.
pub fn build_persistence(
    settings: &OrganizerSettings,
) -> Result<Box<dyn PersistenceAdapter>, PersistenceError> {
    let storage = &settings.storage;
    let key = storage.slot_key.clone();

    let adapter: Box<dyn PersistenceAdapter> = match storage.backend {
        StorageBackend::Memory => Box::new(SlotPersistence::new(MemoryStore::new(), key)),
        StorageBackend::JsonFile => {
            let dir = platform::resolve_data_dir(storage.data_dir.as_deref());
            info!("storing bookmarks as JSON under {}", dir.display());
            Box::new(SlotPersistence::new(JsonFileStore::new(dir), key))
        }
        StorageBackend::Sqlite => {
            let dir = platform::resolve_data_dir(storage.data_dir.as_deref());
            fs::create_dir_all(&dir).map_err(|e| {
                PersistenceError::Write(format!("Failed to create data directory: {}", e))
            })?;
            let path = dir.join(DATABASE_FILE);
            info!("storing bookmarks in {}", path.display());
            Box::new(SlotPersistence::new(SqliteStore::open(path)?, key))
        }
    };
    Ok(adapter)
}
