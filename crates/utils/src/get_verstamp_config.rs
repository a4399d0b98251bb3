use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::read_to_string;
use verstamp_core::Config;

pub const CONFIG_FILE: &str = "config.json";

pub fn get_verstamp_dir(current_dir: &Path) -> PathBuf {
    current_dir.join(".verstamp")
}

/// Configuration of the project at `current_dir`, or the defaults if it has none.
///
/// # Errors
/// Returns error if the configuration file cannot be read or is not valid JSON.
pub async fn get_verstamp_config(current_dir: &Path) -> Result<Config> {
    let config_file = get_verstamp_dir(current_dir).join(CONFIG_FILE);
    if !config_file.is_file() {
        return Ok(Config::default());
    }
    let content = read_to_string(&config_file)
        .await
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    // An empty file means defaults
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid configuration in {}", config_file.display()))
}
