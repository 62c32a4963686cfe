//! Configuration module for Stowage.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, StowageError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/stowage.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Quota behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// Whether deleting a file returns its bytes to the owner's quota.
    ///
    /// Off by default: quota consumption is one-way, matching the
    /// anti-abuse reading of the original behavior.
    #[serde(default)]
    pub reclaim_on_delete: bool,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            reclaim_on_delete: false,
        }
    }
}

/// Expiry sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Whether the background expiry sweep runs.
    #[serde(default = "default_sweep_enabled")]
    pub enabled: bool,
    /// Sweep interval in seconds.
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    3600 // 1 hour
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_sweep_enabled(),
            interval_secs: default_sweep_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/stowage.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Quota behavior settings.
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Expiry sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StowageError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StowageError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `STOWAGE_DB_PATH`: Override the database path
    /// - `STOWAGE_PORT`: Override the server port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("STOWAGE_DB_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(port) = std::env::var("STOWAGE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the sweep is enabled with a zero interval.
    pub fn validate(&self) -> Result<()> {
        if self.sweep.enabled && self.sweep.interval_secs == 0 {
            return Err(StowageError::Config(
                "sweep is enabled but interval_secs is 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.database.path, "data/stowage.db");
        assert!(!config.quota.reclaim_on_delete);
        assert!(config.sweep.enabled);
        assert_eq!(config.sweep.interval_secs, 3600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.sweep.interval_secs, 3600);
    }

    #[test]
    fn test_parse_partial() {
        let toml = r#"
[server]
port = 9000

[quota]
reclaim_on_delete = true

[sweep]
interval_secs = 60
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        // Unspecified fields keep defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.quota.reclaim_on_delete);
        assert_eq!(config.sweep.interval_secs, 60);
        assert!(config.sweep.enabled);
    }

    #[test]
    fn test_parse_invalid() {
        let result = Config::parse("server = \"not a table\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_interval() {
        let toml = r#"
[sweep]
enabled = true
interval_secs = 0
"#;
        let config = Config::parse(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_disabled_sweep_allows_zero_interval() {
        let toml = r#"
[sweep]
enabled = false
interval_secs = 0
"#;
        let config = Config::parse(toml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("nonexistent-config.toml");
        assert!(result.is_err());
    }
}
