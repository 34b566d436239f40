//! Configuration module for DevDrop.

use serde::Deserialize;
use std::path::Path;

use crate::{DevDropError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage locations and limits.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON credential store.
    #[serde(default = "default_users_path")]
    pub users_path: String,
    /// Path to the JSON file registry.
    #[serde(default = "default_files_path")]
    pub files_path: String,
    /// Directory holding uploaded file contents.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_users_path() -> String {
    "users.json".to_string()
}

fn default_files_path() -> String {
    "files.json".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_path: default_users_path(),
            files_path: default_files_path(),
            upload_dir: default_upload_dir(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Fixed session lifetime in seconds.
    #[serde(default = "default_session_duration")]
    pub duration_secs: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_session_duration() -> u64 {
    3600 // 1 hour
}

fn default_cookie_name() -> String {
    "devdrop_session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_session_duration(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
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
    "logs/devdrop.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DevDropError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DevDropError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PORT`: listening port
    /// - `DEVDROP_PORT`: listening port (takes precedence over `PORT`)
    pub fn apply_env_overrides(&mut self) {
        for var in ["PORT", "DEVDROP_PORT"] {
            if let Ok(value) = std::env::var(var) {
                match value.parse::<u16>() {
                    Ok(port) => self.server.port = port,
                    Err(_) => tracing::warn!(var, value = %value, "Ignoring invalid port override"),
                }
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.session.duration_secs == 0 {
            return Err(DevDropError::Config(
                "session.duration_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(DevDropError::Config(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(DevDropError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.storage.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }
}
