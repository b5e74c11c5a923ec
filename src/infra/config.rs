//! Environment-driven application configuration.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use secrecy::SecretString;

use crate::domain::ConfigError;

use super::database::PostgresConfig;

/// Runtime configuration assembled from the process environment.
///
/// The database URL is held behind [`SecretString`] so it never shows up in
/// debug output or logs.
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: SecretString,
    pub server_addr: SocketAddr,
    pub pool: PostgresConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// `DATABASE_URL` is required. `SERVER_ADDR`, `DB_MAX_CONNECTIONS` and
    /// `DB_MIN_CONNECTIONS` are optional and fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` is absent
    /// and [`ConfigError::InvalidValue`] when an optional variable is set but
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let server_addr = parse_or(
            "SERVER_ADDR",
            env::var("SERVER_ADDR").ok(),
            SocketAddr::from(([0, 0, 0, 0], 3000)),
        )?;

        let defaults = PostgresConfig::default();
        let pool = PostgresConfig {
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                env::var("DB_MAX_CONNECTIONS").ok(),
                defaults.max_connections,
            )?,
            min_connections: parse_or(
                "DB_MIN_CONNECTIONS",
                env::var("DB_MIN_CONNECTIONS").ok(),
                defaults.min_connections,
            )?,
            ..defaults
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            server_addr,
            pool,
        })
    }
}

/// Parses an optional raw value, falling back to `default` when unset.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
