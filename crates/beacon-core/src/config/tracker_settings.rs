//! Deployment-level tracker settings with layered resolution.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Knobs that are fixed per deployment rather than per embedding page.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`BEACON_*`)
/// 2. Settings file (`beacon.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Prefix of declarative binding class tokens: `<prefix>--<type>--<value>`.
    pub binding_prefix: String,
    /// Session-storage key holding the dedupe token.
    pub storage_key: String,
    /// Path appended to the endpoint root.
    pub collect_path: String,
    /// Delay before re-scanning the node tree after a navigation.
    pub rescan_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Global binding point of the public entry point.
    pub entry_point: String,
    /// `tracing` filter used by `init_tracing_for` when `BEACON_LOG` is unset.
    pub log_filter: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            binding_prefix: defaults::DEFAULT_BINDING_PREFIX.to_string(),
            storage_key: defaults::DEFAULT_STORAGE_KEY.to_string(),
            collect_path: defaults::DEFAULT_COLLECT_PATH.to_string(),
            rescan_delay_ms: defaults::DEFAULT_RESCAN_DELAY_MS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            entry_point: defaults::DEFAULT_ENTRY_POINT.to_string(),
            log_filter: defaults::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TrackerSettings {
    /// Load settings: defaults, then the file at `path` if given, then
    /// `BEACON_*` environment overrides. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse settings from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `BEACON_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("BEACON_BINDING_PREFIX") {
            self.binding_prefix = val;
        }
        if let Some(val) = lookup("BEACON_STORAGE_KEY") {
            self.storage_key = val;
        }
        if let Some(val) = lookup("BEACON_COLLECT_PATH") {
            self.collect_path = val;
        }
        if let Some(v) = lookup("BEACON_RESCAN_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.rescan_delay_ms = v;
        }
        if let Some(v) = lookup("BEACON_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = v;
        }
        if let Some(val) = lookup("BEACON_ENTRY_POINT") {
            self.entry_point = val;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix_ok = !self.binding_prefix.is_empty()
            && self
                .binding_prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !prefix_ok {
            return Err(ConfigError::ValidationFailed {
                field: "binding_prefix".to_string(),
                message: "must be non-empty lowercase alphanumerics or hyphens".to_string(),
            });
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !self.collect_path.starts_with('/') {
            return Err(ConfigError::ValidationFailed {
                field: "collect_path".to_string(),
                message: "must start with '/'".to_string(),
            });
        }
        if self.rescan_delay_ms > defaults::MAX_RESCAN_DELAY_MS {
            return Err(ConfigError::ValidationFailed {
                field: "rescan_delay_ms".to_string(),
                message: format!("must be at most {}", defaults::MAX_RESCAN_DELAY_MS),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "request_timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.entry_point.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "entry_point".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn rescan_delay(&self) -> Duration {
        Duration::from_millis(self.rescan_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Serialize the settings back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
