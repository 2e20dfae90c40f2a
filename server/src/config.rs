//! Configuration management for the server.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Connection pool size cap
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            env::var("HOST").ok(),
            env::var("PORT").ok(),
            env::var("DATABASE_URL").ok(),
            env::var("DB_MAX_CONNECTIONS").ok(),
        )
    }

    /// Build a configuration from raw variable values. Split out of
    /// [`from_env`](Self::from_env) so parsing and defaulting are testable
    /// without touching the process environment.
    fn from_parts(
        host: Option<String>,
        port: Option<String>,
        database_url: Option<String>,
        db_max_connections: Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = host.unwrap_or_else(|| "0.0.0.0".to_string());

        let port = port
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = database_url.ok_or(ConfigError::MissingDatabaseUrl)?;

        let db_max_connections = match db_max_connections {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidMaxConnections)?,
            None => 5,
        };

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid DB_MAX_CONNECTIONS value")]
    InvalidMaxConnections,
}
