// Bookmark organizer state managers
// Managers own mutable state: the bookmark collection and the in-progress edit.

pub mod bookmark_store;
pub mod editing_session;
