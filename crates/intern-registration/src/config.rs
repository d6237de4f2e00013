//! Configuration for the registration service.

use crate::registry::CorruptPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Registration storage configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Path to the JSON registration document
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, registrations are in-memory only)
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Handling of a document that exists but cannot be parsed
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
            persist: true,
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8000
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("response.json")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_deployment() {
        let config = Config::default();

        assert_eq!(config.server.listen_addr, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.registry.path, PathBuf::from("response.json"));
        assert!(config.registry.persist);
        assert_eq!(config.registry.on_corrupt, CorruptPolicy::Discard);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: Config = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.registry.path, PathBuf::from("response.json"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config: Config = config::Config::builder()
            .set_override("server.port", "9090")
            .unwrap()
            .set_override("registry.on_corrupt", "quarantine")
            .unwrap()
            .set_override("registry.persist", "false")
            .unwrap()
            .set_override("log.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.registry.on_corrupt, CorruptPolicy::Quarantine);
        assert!(!config.registry.persist);
        assert_eq!(config.log.format, LogFormat::Json);
    }
}
