//! Bookmark Store for the organizer.
//!
//! Implements `BookmarkStoreTrait`: the canonical, ordered bookmark
//! collection with write-through persistence. New bookmarks go to the front,
//! updates keep their slot, deletes close the gap without reordering.
//!
//! A failed save never undoes the in-memory change. It is returned alongside
//! the mutation result in [`StoreOutcome::save_error`].

use std::collections::HashSet;

use chrono::{SubsecRound, Utc};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::services::derived_views;
use crate::services::persistence::PersistenceAdapter;
use crate::services::validator;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{BookmarkError, PersistenceError};

/// Result of a mutation that was applied in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOutcome<T> {
    pub value: T,
    /// Set when the write-through save failed.
    pub save_error: Option<PersistenceError>,
}

impl<T> StoreOutcome<T> {
    /// Returns `true` if the change reached durable storage.
    pub fn is_durable(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Trait defining bookmark store operations.
pub trait BookmarkStoreTrait {
    fn create(&mut self, title: &str, url: &str, tags: &[&str]) -> Result<StoreOutcome<Bookmark>, BookmarkError>;
    fn update(&mut self, id: &str, title: &str, url: &str, tags: &[&str]) -> Result<StoreOutcome<Bookmark>, BookmarkError>;
    fn delete(&mut self, id: &str) -> StoreOutcome<bool>;
    fn list(&self) -> &[Bookmark];
    fn get(&self, id: &str) -> Option<&Bookmark>;
}

/// Bookmark store backed by an injected persistence adapter.
pub struct BookmarkStore<P: PersistenceAdapter = Box<dyn PersistenceAdapter>> {
    bookmarks: Vec<Bookmark>,
    persistence: P,
    version: u64,
    load_error: Option<PersistenceError>,
}

impl<P: PersistenceAdapter> BookmarkStore<P> {
    /// Creates a store and loads its initial collection from `persistence`.
    ///
    /// A failed load starts the store empty; the reason is kept in [`Self::load_error`].
    /// Records repeating an earlier id are dropped.
    pub fn open(persistence: P) -> Self {
        let (loaded, load_error) = match persistence.try_load() {
            Ok(bookmarks) => (bookmarks, None),
            Err(e) => {
                warn!("starting with an empty bookmark collection: {}", e);
                (Vec::new(), Some(e))
            }
        };

        let mut seen = HashSet::new();
        let mut bookmarks = Vec::with_capacity(loaded.len());
        for bookmark in loaded {
            if seen.insert(bookmark.id.clone()) {
                bookmarks.push(bookmark);
            } else {
                warn!("dropping stored bookmark with duplicate id {}", bookmark.id);
            }
        }

        info!("bookmark store opened with {} bookmarks", bookmarks.len());
        Self {
            bookmarks,
            persistence,
            version: 0,
            load_error,
        }
    }

    /// Why the initial load fell back to an empty collection, if it did.
    pub fn load_error(&self) -> Option<&PersistenceError> {
        self.load_error.as_ref()
    }

    /// Monotonic counter bumped by every mutation; keys derived-view caches.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Sorted distinct tags of the current collection.
    pub fn distinct_tags(&self) -> Vec<String> {
        derived_views::distinct_tags(&self.bookmarks)
    }

    /// Current collection narrowed by search term and optional tag.
    pub fn filtered(&self, search_term: &str, active_tag: Option<&str>) -> Vec<&Bookmark> {
        derived_views::filtered(&self.bookmarks, search_term, active_tag)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }

    /// Draws UUIDs until one is unused in the live collection.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Bumps the version and writes the collection through to storage.
    fn write_through<T>(&mut self, value: T) -> StoreOutcome<T> {
        self.version += 1;
        let save_error = match self.persistence.save(&self.bookmarks) {
            Ok(()) => None,
            Err(e) => {
                warn!("bookmark change kept in memory only: {}", e);
                Some(e)
            }
        };
        StoreOutcome { value, save_error }
    }
}

impl<P: PersistenceAdapter> BookmarkStoreTrait for BookmarkStore<P> {
    /// Validates and prepends a new bookmark.
    fn create(
        &mut self,
        title: &str,
        url: &str,
        tags: &[&str],
    ) -> Result<StoreOutcome<Bookmark>, BookmarkError> {
        validator::validate(title, url)?;

        let bookmark = Bookmark {
            id: self.fresh_id(),
            title: title.to_string(),
            url: url.to_string(),
            tags: validator::normalize_tags(tags),
            created_at: Utc::now().trunc_subsecs(3),
        };
        self.bookmarks.insert(0, bookmark.clone());
        debug!("created bookmark {} ({})", bookmark.id, bookmark.url);

        Ok(self.write_through(bookmark))
    }

    /// Replaces title, url and tags of an existing bookmark in place.
    fn update(
        &mut self,
        id: &str,
        title: &str,
        url: &str,
        tags: &[&str],
    ) -> Result<StoreOutcome<Bookmark>, BookmarkError> {
        let index = self
            .position(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
        validator::validate(title, url)?;

        let slot = &mut self.bookmarks[index];
        slot.title = title.to_string();
        slot.url = url.to_string();
        slot.tags = validator::normalize_tags(tags);
        let updated = slot.clone();
        debug!("updated bookmark {}", id);

        Ok(self.write_through(updated))
    }

    /// Removes the bookmark if present. Unknown ids return `false`.
    fn delete(&mut self, id: &str) -> StoreOutcome<bool> {
        let removed = match self.position(id) {
            Some(index) => {
                self.bookmarks.remove(index);
                debug!("deleted bookmark {}", id);
                true
            }
            None => false,
        };
        self.write_through(removed)
    }

    fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }
}
