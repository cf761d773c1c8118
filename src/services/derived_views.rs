// Derived views over the bookmark collection.
// Pure functions of a collection slice; nothing here mutates or persists.

use std::collections::BTreeSet;

use crate::types::bookmark::Bookmark;
use crate::types::filter::FilterState;

/// Every distinct tag across `bookmarks`, sorted ascending by UTF-16 code unit.
///
/// This differs from `str` ordering only between astral characters and BMP
/// characters at U+E000 and above; the UTF-16 order is what front ends sort by.
pub fn distinct_tags(bookmarks: &[Bookmark]) -> Vec<String> {
    let mut tags: Vec<String> = bookmarks
        .iter()
        .flat_map(|b| b.tags.iter())
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    tags.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    tags
}

/// Bookmarks matching `search_term` (case-insensitive, title or url) and,
/// when set, carrying `active_tag` exactly. Input order is preserved.
pub fn filtered<'a>(
    bookmarks: &'a [Bookmark],
    search_term: &str,
    active_tag: Option<&str>,
) -> Vec<&'a Bookmark> {
    let needle = search_term.to_lowercase();
    bookmarks
        .iter()
        .filter(|b| matches_search(b, &needle))
        .filter(|b| active_tag.map_or(true, |tag| b.has_tag(tag)))
        .collect()
}

/// Applies a [`FilterState`] to `bookmarks`.
pub fn apply_filter<'a>(bookmarks: &'a [Bookmark], filter: &FilterState) -> Vec<&'a Bookmark> {
    filtered(bookmarks, &filter.search_term, filter.active_tag.as_deref())
}

/// `needle` must already be lowercased.
fn matches_search(bookmark: &Bookmark, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    bookmark.title.to_lowercase().contains(needle) || bookmark.url.to_lowercase().contains(needle)
}

/// Memoized [`distinct_tags`], invalidated whenever the store version moves.
#[derive(Debug, Default)]
pub struct TagIndex {
    version: Option<u64>,
    tags: Vec<String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tag list for the collection at `version`, recomputing on change.
    pub fn get(&mut self, version: u64, bookmarks: &[Bookmark]) -> &[String] {
        if self.version != Some(version) {
            self.tags = distinct_tags(bookmarks);
            self.version = Some(version);
        }
        &self.tags
    }

    /// Version the cached list was computed for, if any.
    pub fn cached_version(&self) -> Option<u64> {
        self.version
    }
}
