//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://./tinylink.db"
//! # or a bare path, as accepted by DB_URL
//! export DB_URL="./tinylink.db"
//! ```
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` (or `DB_URL`) - SQLite connection URL or database file path
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`, or `0.0.0.0:3000`)
//! - `PORT` - Port used when `LISTEN` is not set
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)
//! - `DB_IDLE_TIMEOUT` - Seconds before an idle connection is retired, 0 disables (default: 600)
//! - `DB_MAX_LIFETIME` - Seconds before a connection is retired, 0 disables (default: 1800)
//! - `DB_QUERY_TIMEOUT` - Seconds allowed for a single insert or lookup (default: 5)
//! - `HEALTH_PROBE_TIMEOUT_MS` - Health check ping timeout (default: 1000)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Idle connection lifetime in seconds before it is closed
    /// (`DB_IDLE_TIMEOUT`, default: 600).
    pub db_idle_timeout: u64,
    /// Maximum connection lifetime in seconds (`DB_MAX_LIFETIME`, default: 1800).
    pub db_max_lifetime: u64,
    /// Upper bound for one insert or lookup in seconds (`DB_QUERY_TIMEOUT`, default: 5).
    pub db_query_timeout: u64,
    /// Health probe timeout in milliseconds (`HEALTH_PROBE_TIMEOUT_MS`, default: 1000).
    pub health_probe_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if no database location is configured.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_connect_timeout: parse_or("DB_CONNECT_TIMEOUT", 30),
            db_idle_timeout: parse_or("DB_IDLE_TIMEOUT", 600),
            db_max_lifetime: parse_or("DB_MAX_LIFETIME", 1800),
            db_query_timeout: parse_or("DB_QUERY_TIMEOUT", 5),
            health_probe_timeout_ms: parse_or("HEALTH_PROBE_TIMEOUT_MS", 1000),
        })
    }

    /// Loads the database URL.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. `DB_URL` environment variable
    ///
    /// Bare file paths are turned into `sqlite://` URLs.
    fn load_database_url() -> Result<String> {
        let raw = env::var("DATABASE_URL")
            .or_else(|_| env::var("DB_URL"))
            .context("DATABASE_URL or DB_URL must be set")?;

        Ok(normalize_database_url(&raw))
    }

    /// `LISTEN` wins; otherwise binds all interfaces on `PORT` (default 3000).
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is empty or not an SQLite URL
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a pool size or timeout that must be positive is zero
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") || self.database_url == "sqlite://" {
            anyhow::bail!(
                "DATABASE_URL must be an SQLite URL or file path, got '{}'",
                self.database_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.db_query_timeout == 0 {
            anyhow::bail!("DB_QUERY_TIMEOUT must be greater than 0");
        }
        if self.health_probe_timeout_ms == 0 {
            anyhow::bail!("HEALTH_PROBE_TIMEOUT_MS must be greater than 0");
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }

    /// `None` when idle retirement is disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.db_idle_timeout > 0).then(|| Duration::from_secs(self.db_idle_timeout))
    }

    /// `None` when lifetime retirement is disabled.
    pub fn max_lifetime(&self) -> Option<Duration> {
        (self.db_max_lifetime > 0).then(|| Duration::from_secs(self.db_max_lifetime))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.db_query_timeout)
    }

    pub fn health_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.health_probe_timeout_ms)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Pool size: {}", self.db_max_connections);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an environment variable, falling back to `default` when it is
/// missing or malformed.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Turns a bare file path into an `sqlite://` URL; URLs pass through.
///
/// - `./data.db` → `sqlite://./data.db`
/// - `:memory:` → `sqlite::memory:`
/// - `sqlite://data.db` → unchanged
pub fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.starts_with("sqlite:") {
        raw.to_string()
    } else if raw == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", raw)
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
