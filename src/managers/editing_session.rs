//! Editing Session for the organizer.
//!
//! Tracks the single bookmark currently open in the edit form. The session
//! holds a copy, not a reference: if the bookmark is deleted mid-edit the
//! copy stays intact and `commit` fails with `NotFound` instead of
//! recreating the record.

use log::debug;

use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait, StoreOutcome};
use crate::services::persistence::PersistenceAdapter;
use crate::services::validator;
use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Form field values for pre-filling the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub url: String,
    /// Tags joined with `", "`.
    pub tags: String,
}

#[derive(Debug, Default)]
pub struct EditingSession {
    target: Option<Bookmark>,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing a copy of `bookmark`, replacing any previous target.
    pub fn begin(&mut self, bookmark: &Bookmark) {
        debug!("editing bookmark {}", bookmark.id);
        self.target = Some(bookmark.clone());
    }

    /// Looks `id` up in `store` and starts editing it.
    pub fn begin_by_id<P: PersistenceAdapter>(
        &mut self,
        store: &BookmarkStore<P>,
        id: &str,
    ) -> Result<&Bookmark, BookmarkError> {
        let bookmark = store
            .get(id)
            .cloned()
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
        debug!("editing bookmark {}", bookmark.id);
        Ok(self.target.insert(bookmark))
    }

    /// Applies the edited fields through [`BookmarkStoreTrait::update`].
    ///
    /// Clears the session on success. Any failure leaves it open so the
    /// caller can correct the input or cancel.
    pub fn commit<P: PersistenceAdapter>(
        &mut self,
        store: &mut BookmarkStore<P>,
        title: &str,
        url: &str,
        tags: &[&str],
    ) -> Result<StoreOutcome<Bookmark>, BookmarkError> {
        let id = match &self.target {
            Some(target) => target.id.clone(),
            None => return Err(BookmarkError::NoActiveEdit),
        };

        let outcome = store.update(&id, title, url, tags)?;
        self.target = None;
        Ok(outcome)
    }

    /// Drops the edit target without touching the store.
    pub fn cancel(&mut self) {
        self.target = None;
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Bookmark> {
        self.target.as_ref()
    }

    pub fn form(&self) -> Option<EditForm> {
        self.target.as_ref().map(|b| EditForm {
            title: b.title.clone(),
            url: b.url.clone(),
            tags: validator::format_tag_input(&b.tags),
        })
    }
}
