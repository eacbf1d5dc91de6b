use std::str::FromStr;
use std::time::Duration;

use kpi_core::error::CoreError;
use sqlx::postgres::PgConnectOptions;

/// Database configuration, built once at startup and handed to [`crate::create_pool`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub connect_options: PgConnectOptions,
    /// Pool size (default: `10`).
    pub max_connections: u32,
    /// How long a request waits for a free connection (default: `5s`).
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the connection is assembled from
    /// the individual variables below.
    ///
    /// | Env Var                   | Default        |
    /// |---------------------------|----------------|
    /// | `DB_HOST`                 | `localhost`    |
    /// | `DB_PORT`                 | `5432`         |
    /// | `DB_USER`                 | `postgres`     |
    /// | `DB_PASSWORD`             | (empty)        |
    /// | `DB_NAME`                 | `kpi_tracker`  |
    /// | `DB_MAX_CONNECTIONS`      | `10`           |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`            |
    pub fn from_env() -> Result<Self, CoreError> {
        let connect_options = match std::env::var("DATABASE_URL") {
            Ok(url) => PgConnectOptions::from_str(&url)
                .map_err(|e| CoreError::Internal(format!("Invalid DATABASE_URL: {e}")))?,
            Err(_) => {
                let host = env_or("DB_HOST", "localhost");
                let port: u16 = parse_env("DB_PORT", "5432")?;
                let user = env_or("DB_USER", "postgres");
                let password = env_or("DB_PASSWORD", "");
                let database = env_or("DB_NAME", "kpi_tracker");

                PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .password(&password)
                    .database(&database)
            }
        };

        Ok(Self {
            connect_options,
            max_connections: parse_env("DB_MAX_CONNECTIONS", "10")?,
            acquire_timeout: Duration::from_secs(parse_env("DB_ACQUIRE_TIMEOUT_SECS", "5")?),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: &str) -> Result<T, CoreError> {
    env_or(key, default)
        .parse()
        .map_err(|_| CoreError::Internal(format!("{key} has an invalid value")))
}
