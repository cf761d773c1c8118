// Bookmark organizer settings engine
// Loads, saves, edits and resets `OrganizerSettings`.
// Settings are stored as a JSON file at the platform-specific config path.

use std::env;
use std::fs;
use std::path::Path;

use log::debug;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::OrganizerSettings;

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "BOOKMARK_ORGANIZER_CONFIG";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<OrganizerSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &OrganizerSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: OrganizerSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// Path resolution: `path_override`, then `$BOOKMARK_ORGANIZER_CONFIG`,
    /// then `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| {
                platform::get_config_dir()
                    .join("settings.json")
                    .to_string_lossy()
                    .to_string()
            });

        Self {
            config_path,
            settings: OrganizerSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<OrganizerSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!("no settings file at {}, using defaults", self.config_path);
            self.settings = OrganizerSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &OrganizerSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation path (`storage.backend`,
    /// `logging.level`, ...) and saves.
    ///
    /// Unknown keys are rejected, and the edited document must still
    /// deserialize into `OrganizerSettings`.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut document = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (format!("/{}", parent.replace('.', "/")), leaf),
            None => (String::new(), key),
        };

        let parent = document
            .pointer_mut(&parent_path)
            .and_then(|v| v.as_object_mut())
            .ok_or_else(|| {
                SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
            })?;
        match parent.get_mut(leaf) {
            Some(slot) => *slot = value,
            None => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        self.settings = serde_json::from_value(document).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = OrganizerSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
