//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (falls back to `PORT`, default: 8080)
//! - `CATALOG_TEMPLATES_DIR` - Directory holding the HTML pages (default: templates)
//! - `CATALOG_STATIC_DIR` - Directory served under `/static` (default: static)
//! - `CATALOG_CORS_ORIGINS` - Comma-separated allowed origins (default: any origin)
//! - `CATALOG_DB_MAX_CONNECTIONS` - Connection pool size (default: 10)
//! - `CATALOG_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog application configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Maximum number of pooled database connections
    pub max_connections: u32,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the static HTML pages
    pub templates_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<HeaderValue>,
    /// Emit JSON-formatted logs
    pub json_logs: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Fraction of error events to send
    pub sample_rate: f32,
    /// Fraction of transactions to trace
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl CatalogConfig {
    /// Create a configuration with defaults for every optional setting.
    #[must_use]
    pub fn new(database_url: SecretString) -> Self {
        Self {
            database_url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            cors_origins: Vec::new(),
            json_logs: false,
            sentry: SentryConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or an optional
    /// variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::new(get_database_url("CATALOG_DATABASE_URL")?);

        if let Some(host) = get_optional_env("CATALOG_HOST") {
            config.host = parse_var("CATALOG_HOST", &host)?;
        }
        if let Some((key, port)) = get_first_env(&["CATALOG_PORT", "PORT"]) {
            config.port = parse_var(key, &port)?;
        }
        if let Some(max) = get_optional_env("CATALOG_DB_MAX_CONNECTIONS") {
            config.max_connections = parse_var("CATALOG_DB_MAX_CONNECTIONS", &max)?;
            if config.max_connections == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    "CATALOG_DB_MAX_CONNECTIONS".to_string(),
                    "must be at least 1".to_string(),
                ));
            }
        }
        if let Some(dir) = get_optional_env("CATALOG_TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get_optional_env("CATALOG_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(origins) = get_optional_env("CATALOG_CORS_ORIGINS") {
            config.cors_origins = parse_origins("CATALOG_CORS_ORIGINS", &origins)?;
        }
        config.json_logs = get_optional_env("CATALOG_LOG_FORMAT")
            .is_some_and(|format| format.eq_ignore_ascii_case("json"));
        config.sentry = SentryConfig::from_env()?;

        Ok(config)
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut sentry = Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            ..Self::default()
        };
        if let Some(rate) = get_optional_env("SENTRY_SAMPLE_RATE") {
            sentry.sample_rate = parse_var("SENTRY_SAMPLE_RATE", &rate)?;
        }
        if let Some(rate) = get_optional_env("SENTRY_TRACES_SAMPLE_RATE") {
            sentry.traces_sample_rate = parse_var("SENTRY_TRACES_SAMPLE_RATE", &rate)?;
        }
        Ok(sentry)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    get_first_env(&[primary_key, "DATABASE_URL"])
        .map(|(_, value)| SecretString::from(value))
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get the first set variable among `keys`, along with the key that matched.
fn get_first_env<'a>(keys: &[&'a str]) -> Option<(&'a str, String)> {
    keys.iter()
        .find_map(|key| get_optional_env(key).map(|value| (*key, value)))
}

/// Parse a variable value, mapping failures to `ConfigError::InvalidEnvVar`.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a comma-separated list of origins into header values.
fn parse_origins(key: &str, value: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar(key.to_string(), format!("{origin}: {e}"))
            })
        })
        .collect()
}
