mod config;
mod state;

pub use config::{AnnouncementsConfig, Config, DefaultsConfig};
pub use state::StateStore;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/repmate[-dev]/` based on REPMATE_ENV.
///
/// Set REPMATE_ENV=dev to use a separate development data directory.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REPMATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("repmate-dev")
    } else {
        base_dir.join("repmate")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
