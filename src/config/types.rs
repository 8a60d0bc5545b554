//! Core configuration types and loading.

use serde::Deserialize;
use slirc_ident::{Casemapping, IdentError, PrefixMap};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{default_expire_delay, default_log_level, default_prefix};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Presence tracking behaviour.
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Logging output.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Presence tracking configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Grace period, in seconds, during which a user who left every shared
    /// channel stays resolvable. Zero forgets them immediately; negative
    /// values are treated as zero.
    #[serde(default = "default_expire_delay")]
    pub expire_delay: i64,
    /// Casemapping assumed until the server sends `CASEMAPPING`.
    #[serde(default)]
    pub casemapping: Casemapping,
    /// `PREFIX` value assumed until the server sends its own.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Whether `userhost-in-names` is negotiated by the connection layer,
    /// making NAMES entries carry full masks from the start.
    #[serde(default)]
    pub userhost_in_names: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            expire_delay: default_expire_delay(),
            casemapping: Casemapping::default(),
            prefix: default_prefix(),
            userhost_in_names: false,
        }
    }
}

impl TrackerConfig {
    /// The grace period, clamped to zero.
    pub fn expire_after(&self) -> Duration {
        Duration::from_secs(self.expire_delay.max(0).unsigned_abs())
    }

    /// The configured `PREFIX` value, parsed.
    pub fn prefix_map(&self) -> Result<PrefixMap, IdentError> {
        PrefixMap::parse(&self.prefix)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
