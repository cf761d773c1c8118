use serde::{Deserialize, Serialize};

/// Slot key used when the settings file does not name one.
pub const DEFAULT_SLOT_KEY: &str = "bookmark-organizer.bookmarks";

/// Top-level organizer settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrganizerSettings {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

/// Where and how the bookmark collection is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
    pub slot_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            data_dir: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

/// Key-value backend holding the bookmark slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Sqlite,
    JsonFile,
    Memory,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter directive, e.g. `info` or `bookmark_organizer=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
