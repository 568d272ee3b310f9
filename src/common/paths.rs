use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the subalign config directory, creating it if needed
pub fn subalign_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("subalign");

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("creating config directory at {}", config_dir.display()))?;

    Ok(config_dir)
}

/// Default location of the sync config file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(subalign_config_dir()?.join("config.toml"))
}
