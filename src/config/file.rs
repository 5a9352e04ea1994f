// src/config/file.rs
// File-based configuration from ~/.facelens/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct FacelensConfig {
    #[serde(default)]
    pub api: ApiSection,
}

/// `[api]` section
#[derive(Debug, Deserialize, Default)]
pub struct ApiSection {
    pub base_url: Option<String>,
    /// "live" or "mock"
    pub mode: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FacelensConfig {
    /// Load config from ~/.facelens/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; a missing or broken file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".facelens")
            .join("config.toml")
    }
}
