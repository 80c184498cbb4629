//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod models;

use std::path::PathBuf;

use tracing::debug;

use resx_core::models::config::ResxConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resx")
        .join("config.json")
}

/// Config file selected by `--config`, or the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when the file does not exist.
///
/// A file named explicitly with `--config` must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<ResxConfig> {
    let path = config_path(explicit);

    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        return ResxConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e));
    }

    if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Ok(ResxConfig::default())
}

