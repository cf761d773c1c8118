// Bookmark organizer platform abstraction
// Platform-specific config and data directories, selected with `cfg(target_os)`.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BOOKMARK_ORGANIZER_DATA_DIR";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/bookmark-organizer` (or `$XDG_CONFIG_HOME/bookmark-organizer`)
/// - **macOS**: `~/Library/Application Support/BookmarkOrganizer`
/// - **Windows**: `%APPDATA%/BookmarkOrganizer`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/bookmark-organizer` (or `$XDG_DATA_HOME/bookmark-organizer`)
/// - **macOS**: `~/Library/Application Support/BookmarkOrganizer`
/// - **Windows**: `%APPDATA%/BookmarkOrganizer`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Resolves the directory bookmark data lives in.
///
/// Order: `$BOOKMARK_ORGANIZER_DATA_DIR`, then `configured`, then [`get_data_dir`].
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match configured {
        Some(dir) => PathBuf::from(dir),
        None => get_data_dir(),
    }
}
