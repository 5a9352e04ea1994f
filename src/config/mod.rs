// src/config/mod.rs
// Client configuration: defaults, ~/.facelens/config.toml, environment, flags

pub mod env;
pub mod file;

pub use env::EnvOverrides;
pub use file::FacelensConfig;

use crate::http::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Origin used when no base URL is configured (the dev proxy target)
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// Simulated latency range for the mock backend, in milliseconds
pub const DEFAULT_MOCK_LATENCY_MS: RangeInclusive<u64> = 500..=1500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unknown API mode '{0}' (expected 'live' or 'mock')")]
    UnknownMode(String),

    #[error("invalid timeout '{0}'")]
    InvalidTimeout(String),
}

/// Which backend variant the API client is composed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Live,
    Mock,
}

impl ApiMode {
    /// Parse mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "live" | "real" | "production" => Some(Self::Live),
            "mock" | "dev" | "development" => Some(Self::Mock),
            _ => None,
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Resolved settings used to compose an `ApiClient`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL override; `None` means the default origin
    pub base_url: Option<String>,
    pub mode: ApiMode,
    pub timeout: Duration,
    pub mock_latency_ms: RangeInclusive<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            mode: ApiMode::Live,
            timeout: DEFAULT_TIMEOUT,
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
        }
    }
}

impl ClientConfig {
    /// Layer config file then environment over the defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_file(&FacelensConfig::load())?;
        config.apply_env(&EnvOverrides::from_env())?;
        debug!(
            mode = %config.mode,
            base_url = %config.origin(),
            timeout_secs = config.timeout.as_secs(),
            "Client configuration resolved"
        );
        Ok(config)
    }

    pub fn apply_file(&mut self, file: &FacelensConfig) -> Result<(), ConfigError> {
        if let Some(ref url) = file.api.base_url {
            self.base_url = Some(normalize_base_url(url)?);
        }
        if let Some(ref mode) = file.api.mode {
            self.mode = ApiMode::parse(mode).ok_or_else(|| ConfigError::UnknownMode(mode.clone()))?;
        }
        if let Some(secs) = file.api.timeout_secs {
            self.timeout = timeout_from_secs(secs)?;
        }
        Ok(())
    }

    pub fn apply_env(&mut self, env: &EnvOverrides) -> Result<(), ConfigError> {
        if let Some(ref url) = env.base_url {
            self.base_url = Some(normalize_base_url(url)?);
        }
        if let Some(ref mode) = env.mode {
            self.mode = ApiMode::parse(mode).ok_or_else(|| ConfigError::UnknownMode(mode.clone()))?;
        }
        if let Some(ref secs) = env.timeout_secs {
            let parsed: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            self.timeout = timeout_from_secs(parsed)?;
        }
        Ok(())
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = Some(normalize_base_url(url)?);
        Ok(self)
    }

    pub fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mock_latency(mut self, latency_ms: RangeInclusive<u64>) -> Self {
        self.mock_latency_ms = latency_ms;
        self
    }

    /// Origin requests are resolved against
    pub fn origin(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    /// Absolute URL for an API path such as `/api/predict`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.origin(), path.trim_start_matches('/'))
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout(secs.to_string()));
    }
    Ok(Duration::from_secs(secs))
}

/// Validate a base URL and strip its trailing slash.
/// Only http and https are accepted; a path prefix is kept.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
