// src/config/env.rs
// Environment-based overrides - single place that reads FACELENS_* variables

use tracing::debug;

pub const API_URL_VAR: &str = "FACELENS_API_URL";
pub const API_MODE_VAR: &str = "FACELENS_API_MODE";
pub const TIMEOUT_VAR: &str = "FACELENS_TIMEOUT_SECS";

/// Raw override values; validated when applied to `ClientConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub mode: Option<String>,
    pub timeout_secs: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup, filtering empty values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let overrides = Self {
            base_url: read(API_URL_VAR),
            mode: read(API_MODE_VAR),
            timeout_secs: read(TIMEOUT_VAR),
        };

        if overrides != Self::default() {
            debug!(?overrides, "Environment overrides found");
        }
        overrides
    }
}
