// Bookmark organizer platform paths for Linux
// Config: ~/.config/bookmark-organizer
// Data:   ~/.local/share/bookmark-organizer

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "bookmark-organizer";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/bookmark-organizer` if set, otherwise `~/.config/bookmark-organizer`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".config").join(APP_DIR),
    }
}

/// Uses `$XDG_DATA_HOME/bookmark-organizer` if set, otherwise `~/.local/share/bookmark-organizer`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".local").join("share").join(APP_DIR),
    }
}
