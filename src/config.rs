//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines the defaults
//! for the HTTP listener, the database pool, the startup readiness gate and
//! logging. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::db::DatabaseKind;
use crate::startup::{RetryPolicy, StartupPolicy};

// =============================================================================
// Startup Readiness Gate
// =============================================================================

/// Number of outer attempts (probe + table creation) before giving up
pub const STARTUP_MAX_ATTEMPTS: u32 = 30;

/// Delay in seconds between failed outer attempts
pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

/// Connectivity checks made by a single probe
pub const PROBE_ATTEMPTS: u32 = 1;

/// Delay in seconds between connectivity checks within one probe
pub const PROBE_INTERVAL_SECS: u64 = 2;

// =============================================================================
// Database Pool
// =============================================================================

/// Maximum number of pooled database connections
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Seconds to wait for a pooled connection before failing
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// HTTP Server
// =============================================================================

/// Seconds to drain open connections after a shutdown signal
pub const HTTP_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Cache-Control value applied to every API response
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str =
    formatcp!("{}=debug,tower_http=info", env!("CARGO_CRATE_NAME"));

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Readiness gate settings
    #[serde(default)]
    pub startup: StartupConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Graceful shutdown drain period in seconds (default: 30)
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl HttpServerConfig {
    fn default_shutdown_timeout() -> u64 {
        HTTP_SHUTDOWN_TIMEOUT_SECS
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `mysql://user:pass@db:3306/app` or `sqlite://data/app.db?mode=rwc`
    #[serde(default)]
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseConfig::default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        DB_MAX_CONNECTIONS
    }

    fn default_acquire_timeout() -> u64 {
        DB_ACQUIRE_TIMEOUT_SECS
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartupConfig {
    #[serde(default = "StartupConfig::default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "StartupConfig::default_retry_delay")]
    pub retry_delay_seconds: u64,
    #[serde(default = "StartupConfig::default_probe_attempts")]
    pub probe_attempts: u32,
    #[serde(default = "StartupConfig::default_probe_interval")]
    pub probe_interval_seconds: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_attempts: Self::default_max_attempts(),
            retry_delay_seconds: Self::default_retry_delay(),
            probe_attempts: Self::default_probe_attempts(),
            probe_interval_seconds: Self::default_probe_interval(),
        }
    }
}

impl StartupConfig {
    fn default_max_attempts() -> u32 {
        STARTUP_MAX_ATTEMPTS
    }
    fn default_retry_delay() -> u64 {
        STARTUP_RETRY_DELAY_SECS
    }
    fn default_probe_attempts() -> u32 {
        PROBE_ATTEMPTS
    }
    fn default_probe_interval() -> u64 {
        PROBE_INTERVAL_SECS
    }

    /// Build the gate's retry policies from these settings
    pub fn policy(&self) -> StartupPolicy {
        StartupPolicy {
            attempts: RetryPolicy::new(
                self.max_attempts,
                Duration::from_secs(self.retry_delay_seconds),
            ),
            probe: RetryPolicy::new(
                self.probe_attempts,
                Duration::from_secs(self.probe_interval_seconds),
            ),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    /// Read and validate the configuration file.
    ///
    /// `database_url` replaces `[database] url` when given (CLI flag or
    /// `DATABASE_URL`).
    pub fn load<P: AsRef<Path>>(
        path: P,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents, database_url)
    }

    pub fn from_toml(contents: &str, database_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;

        if let Some(url) = database_url {
            config.database.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No database URL configured. Set [database] url or DATABASE_URL".to_string(),
            ));
        }
        DatabaseKind::from_url(&self.database.url)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.startup.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "startup.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.startup.probe_attempts == 0 {
            return Err(ConfigError::Validation(
                "startup.probe_attempts must be at least 1".to_string(),
            ));
        }

        match self.logging.format.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
