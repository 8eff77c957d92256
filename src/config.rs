//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Every key is optional; the defaults reproduce the fixed
//! deployment the service was built for: a password-less local MySQL
//! `coursedb` database and an HTTP listener on port 5000.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Default MySQL connection target.
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@127.0.0.1:3306/coursedb";

/// Which [`crate::persistence::EmployeeStore`] implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// `sqlx` MySQL pool.
    MySql,
    /// Process-local map; nothing survives a restart.
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                key: "STORE",
                value: other.to_string(),
            }),
        }
    }
}

/// Log output format for the `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Backing store implementation.
    pub store: StoreKind,

    /// MySQL connection string.
    pub database_url: String,

    /// Maximum number of open database connections.
    pub database_max_connections: u32,

    /// Maximum lifetime of a pooled connection, in seconds.
    pub database_max_lifetime_secs: u64,

    /// Time budget for a single store operation.
    pub store_op_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            store: StoreKind::MySql,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 10,
            database_max_lifetime_secs: 180,
            store_op_timeout: crate::persistence::DEFAULT_OP_TIMEOUT,
            log_format: LogFormat::Text,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file,
    /// then reads each key through [`ServiceConfig::from_lookup`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` or `STORE` is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Numeric keys that are missing or unparsable fall back to their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` or `STORE` is set but
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LISTEN_ADDR",
                value: raw,
            })?,
            None => defaults.listen_addr,
        };

        let store = match lookup("STORE") {
            Some(raw) => raw.parse()?,
            None => defaults.store,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let database_max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            defaults.database_max_connections,
        );
        let database_max_lifetime_secs = parse_or(
            &lookup,
            "DATABASE_MAX_LIFETIME_SECS",
            defaults.database_max_lifetime_secs,
        );
        let store_op_timeout = Duration::from_secs(parse_or(
            &lookup,
            "STORE_OP_TIMEOUT_SECS",
            defaults.store_op_timeout.as_secs(),
        ));

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => defaults.log_format,
        };

        Ok(Self {
            listen_addr,
            store,
            database_url,
            database_max_connections,
            database_max_lifetime_secs,
            store_op_timeout,
            log_format,
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
