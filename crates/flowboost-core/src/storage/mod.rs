mod config;

pub use config::{
    ApiConfig, BreakdownDepth, Config, EnergyPatterns, LearningStyle, NotificationsConfig,
    PreferencesPayload, ProfileConfig, SessionConfig,
};

use std::path::PathBuf;

/// Returns `~/.config/flowboost[-dev]/` based on FLOWBOOST_ENV.
///
/// Set FLOWBOOST_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FLOWBOOST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("flowboost-dev")
    } else {
        base_dir.join("flowboost")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
