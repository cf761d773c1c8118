use serde::{Deserialize, Serialize};

/// Transient list filter driven by the search box and the tag bar. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against title and url.
    #[serde(default)]
    pub search_term: String,
    /// Exact tag a bookmark must carry, or `None` for no tag filtering.
    #[serde(default)]
    pub active_tag: Option<String>,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, active_tag: Option<String>) -> Self {
        Self {
            search_term: search_term.into(),
            active_tag,
        }
    }

    /// Returns `true` when neither filter would exclude anything.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.active_tag.is_none()
    }

    pub fn clear(&mut self) {
        self.search_term.clear();
        self.active_tag = None;
    }
}
