//! Logger setup.
//!
//! Installs `env_logger` behind the `log` facade. `RUST_LOG`, when set, wins
//! over the configured level. Output goes to stderr so the RPC protocol on
//! stdout stays clean.

use env_logger::{Builder, Env, Target};

/// Initializes the global logger with `default_level` as the fallback filter.
///
/// Returns `false` if a logger was already installed; calling it twice is harmless.
pub fn init(default_level: &str) -> bool {
    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
