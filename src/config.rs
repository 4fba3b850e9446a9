//! Application configuration loaded from environment variables.
//!
//! # Configuration Hierarchy
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. In production, configure via environment variables or a `.env` file.
//!
//! # Security Configuration
//!
//! - `API_KEY`: Shared secret clients must send in the `x-api-key` header
//! - `REQUIRE_API_KEY`: When `true`, an empty `API_KEY` aborts startup
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins (default: `*`)
//!
//! # Server
//!
//! - `HOST` / `PORT`: Bind address (default: `0.0.0.0:8000`)
//! - `DEBUG`: Case-insensitive `true` enables debug logging
//! - `MAX_REQUEST_BODY_SIZE`: Request body limit in bytes (default: 1MB)
//!
//! # Observability
//!
//! - `LOG_FORMAT`: `text` (default) or `json`
//! - `METRICS_PORT`: Prometheus listener port (default: 0 = disabled)

use std::env;

use crate::error::{AppError, AppResult};

/// Application name reported by the health endpoint.
pub const APP_NAME: &str = "RakshakAI";

/// Application version reported by the health endpoint.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, single line per event
    #[default]
    Text,
    /// Newline-delimited JSON
    Json,
}

/// Application configuration loaded from environment variables.
///
/// Built once at startup and shared read-only with the auth layer and
/// handlers through [`AppState`](crate::state::AppState).
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Expected value of the `x-api-key` header (empty = every request rejected)
    pub api_key: String,

    /// Abort startup when `api_key` is empty instead of only warning
    pub require_api_key: bool,

    /// Allowed CORS origins. `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Application Metadata
    // =========================================================================
    pub app_name: String,

    pub app_version: String,

    /// Debug mode (default: false)
    pub debug: bool,

    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 8000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    pub log_format: LogFormat,

    /// Port for Prometheus metrics endpoint (0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` for unparsable values (e.g., a
    /// non-numeric `PORT`). A missing `API_KEY` is not an error here; see
    /// [`Config::validate`].
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: lookup("API_KEY").unwrap_or_default(),
            require_api_key: parse_flag(lookup("REQUIRE_API_KEY")),
            cors_allowed_origins: parse_list(lookup("CORS_ALLOWED_ORIGINS"), "*"),
            app_name: APP_NAME.to_string(),
            app_version: APP_VERSION.to_string(),
            debug: parse_flag(lookup("DEBUG")),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 8000)?,
            max_request_body_size: parse_var(&lookup, "MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,
            log_format: parse_log_format(lookup("LOG_FORMAT"))?,
            metrics_port: parse_var(&lookup, "METRICS_PORT", 0)?,
        };

        if config.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(config)
    }

    /// Check that required secrets are present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` when `API_KEY` is empty.
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.is_empty() {
            return Err(AppError::ConfigError(
                "API_KEY must be set in environment variables".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address, or `None` when disabled.
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        self.metrics_enabled()
            .then(|| std::net::SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }
}

/// Parse a variable into the specified type, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}

/// Boolean flags are true only for a case-insensitive `"true"`, untrimmed.
fn parse_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn parse_list(value: Option<String>, default: &str) -> Vec<String> {
    value
        .unwrap_or_else(|| default.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_log_format(value: Option<String>) -> AppResult<LogFormat> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(LogFormat::Text),
        Some(v) if v.eq_ignore_ascii_case("text") => Ok(LogFormat::Text),
        Some(v) if v.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
        Some(other) => Err(AppError::ConfigError(format!(
            "Invalid LOG_FORMAT: {other} (expected `text` or `json`)"
        ))),
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            require_api_key: false,
            cors_allowed_origins: vec!["*".to_string()],
            app_name: APP_NAME.to_string(),
            app_version: APP_VERSION.to_string(),
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_request_body_size: 1024 * 1024,
            log_format: LogFormat::Text,
            metrics_port: 0,
        }
    }
}
