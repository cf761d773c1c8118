use std::fmt;

use serde::{Deserialize, Serialize};

// === ErrorKind ===

/// Closed classification of every failure the organizer can report.
///
/// Callers branch on the kind; the attached error's `Display` carries the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing title/url or a malformed url. Nothing was mutated.
    Validation,
    /// No bookmark with the requested id exists.
    NotFound,
    /// Reading or writing the durable slot failed.
    Persistence,
    /// An edit commit was requested while no edit is in progress.
    NoActiveEdit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Persistence => "persistence",
            ErrorKind::NoActiveEdit => "no_active_edit",
        };
        f.write_str(name)
    }
}

// === ValidationError ===

/// Errors produced by the bookmark field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace only.
    MissingTitle,
    /// URL is empty or whitespace only.
    MissingUrl,
    /// URL does not parse as an absolute URL with a host.
    InvalidUrl { url: String, reason: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingTitle => write!(f, "Title is required"),
            ValidationError::MissingUrl => write!(f, "URL is required"),
            ValidationError::InvalidUrl { url, reason } => {
                write!(f, "Invalid URL '{}': {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// === BookmarkError ===

/// Errors related to bookmark store and editing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    /// The supplied fields failed validation.
    Validation(ValidationError),
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// `commit` was called without a preceding `begin`.
    NoActiveEdit,
}

impl BookmarkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookmarkError::Validation(_) => ErrorKind::Validation,
            BookmarkError::NotFound(_) => ErrorKind::NotFound,
            BookmarkError::NoActiveEdit => ErrorKind::NoActiveEdit,
        }
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::Validation(err) => write!(f, "Bookmark validation failed: {}", err),
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::NoActiveEdit => write!(f, "No bookmark is being edited"),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookmarkError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BookmarkError {
    fn from(err: ValidationError) -> Self {
        BookmarkError::Validation(err)
    }
}

// === PersistenceError ===

/// Errors related to loading or saving the bookmark collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The storage backend could not be read.
    Read(String),
    /// The storage backend rejected the write.
    Write(String),
    /// The stored value is not a valid bookmark collection.
    Corrupt(String),
    /// The collection could not be encoded.
    Serialization(String),
}

impl PersistenceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Persistence
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Read(msg) => write!(f, "Bookmark storage read error: {}", msg),
            PersistenceError::Write(msg) => write!(f, "Bookmark storage write error: {}", msg),
            PersistenceError::Corrupt(msg) => write!(f, "Stored bookmarks are corrupt: {}", msg),
            PersistenceError::Serialization(msg) => {
                write!(f, "Bookmark serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
