//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quotebox/config.toml)
//! 3. Environment variables (QUOTEBOX_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "QUOTEBOX";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for durable storage (the quote collection)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory for session storage (last viewed quote)
    ///
    /// Lives under the system temp dir by default so it is wiped with the OS session.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    /// Directory exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_dir: default_session_dir(),
            export_dir: default_export_dir(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUOTEBOX_DATA_DIR, QUOTEBOX_SESSION_DIR, QUOTEBOX_EXPORT_DIR)
    /// 2. Config file (~/.config/quotebox/config.toml or QUOTEBOX_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_dirs()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // QUOTEBOX_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // QUOTEBOX_SESSION_DIR
        if let Ok(val) = std::env::var(format!("{}_SESSION_DIR", ENV_PREFIX)) {
            self.session_dir = PathBuf::from(val);
        }

        // QUOTEBOX_EXPORT_DIR
        if let Ok(val) = std::env::var(format!("{}_EXPORT_DIR", ENV_PREFIX)) {
            self.export_dir = PathBuf::from(val);
        }
    }

    /// Ensure storage directories exist
    fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.session_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {:?}", dir))?;
            }
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with QUOTEBOX_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quotebox")
            .join("config.toml")
    }

    /// Get the log file path for TUI mode
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebox")
}

/// Get the default session directory
fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("quotebox-session")
}

/// Get the default export directory
fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
