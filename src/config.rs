use anyhow::{Context, Result};
use cssloader_browse::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plugin data directory holding `themes/` and `themes.json`.
    pub data_dir: Option<PathBuf>,
    pub default_sort: SortOrder,
    pub log_level: Option<String>,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join("homebrew")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `~/.config/cssloader/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cssloader").join("config.toml"))
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Loads an explicitly given config file, or the default one if it exists.
pub fn load(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((load_from_path(path)?, Some(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok((load_from_path(&path)?, Some(path))),
        _ => Ok((Config::default(), None)),
    }
}
