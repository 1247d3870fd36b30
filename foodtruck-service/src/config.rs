//! Service settings loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use foodtruck::database::DEFAULT_MAX_CONNECTIONS;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default SQLite database location.
pub const DEFAULT_DATABASE_PATH: &str = "./data/food-trucks.db";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Process-level settings for the HTTP service.
///
/// Search tuning lives in [`foodtruck::SearchConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port to listen on.
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Pooled database connections.
    pub max_connections: u32,
    /// Requests taking longer than this are aborted.
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Load settings from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PORT` | HTTP server port | 8080 |
    /// | `DATABASE_PATH` | SQLite database file | `./data/food-trucks.db` |
    /// | `DATABASE_MAX_CONNECTIONS` | Pooled connections | 5 |
    /// | `TRUCKS_REQUEST_TIMEOUT_SECS` | Per-request timeout | 5 |
    ///
    /// Unset values fall back to their defaults. Unparseable values, and a
    /// zero pool size or timeout, fall back with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_path = std::env::var("DATABASE_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        Self {
            port: env_parse("PORT").unwrap_or(defaults.port),
            database_path,
            max_connections: env_nonzero("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            request_timeout: env_nonzero("TRUCKS_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

fn env_parse<T: FromStr>(var: &'static str) -> Option<T> {
    let value = std::env::var(var).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var, value = %value, "Ignoring invalid value, using default");
            None
        }
    }
}

/// Like [`env_parse`], but a zero counts as invalid.
fn env_nonzero<T: FromStr + Default + PartialEq>(var: &'static str) -> Option<T> {
    env_parse(var).filter(|n: &T| {
        let nonzero = *n != T::default();
        if !nonzero {
            tracing::warn!(var, "Ignoring zero value, using default");
        }
        nonzero
    })
}
