//! Configuration management

mod schema;

pub use schema::{CommandsConfig, Config, GeneralConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

impl Config {
    /// Load configuration from a file or default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path.map(PathBuf::from).or_else(Self::default_path) {
            Some(config_path) => config_path,
            None => return Ok(Self::default()),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            Ok(config)
        } else if path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display())
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default config file path
    /// Uses the platform config directory (via dirs::config_dir), falling back to ~/.config
    pub fn default_path() -> Option<PathBuf> {
        let config_base =
            dirs::config_dir().or_else(|| dirs::home_dir().map(|d| d.join(".config")))?;
        Some(config_base.join("notify-actions").join("config.toml"))
    }

    /// Deadline for the whole run, if any
    pub fn deadline(&self) -> Option<Duration> {
        match self.general.deadline_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}
