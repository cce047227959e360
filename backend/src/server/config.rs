//! HTTP server configuration from the environment.

use std::net::SocketAddr;

/// Configuration errors raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is missing.
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },
    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Server configuration resolved from environment variables.
///
/// - `DATABASE_URL` (required) — PostgreSQL connection string.
/// - `BIND_ADDR` (default `0.0.0.0:8080`) — socket address to listen on.
/// - `DB_POOL_MAX_SIZE` (default `10`) — connection pool ceiling.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
    pool_max_size: u32,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
            name: "DATABASE_URL",
        })?;

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw.parse().map_err(|err| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: format!("{err}"),
            })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let pool_max_size = match std::env::var("DB_POOL_MAX_SIZE") {
            Ok(raw) => raw.parse().map_err(|err| ConfigError::Invalid {
                name: "DB_POOL_MAX_SIZE",
                message: format!("{err}"),
            })?,
            Err(_) => 10,
        };

        Ok(Self {
            bind_addr,
            database_url,
            pool_max_size,
        })
    }

    /// Socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Connection pool ceiling.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }
}
