//! Application error types with proper error chaining.

use thiserror::Error;

use super::types::ClientId;

/// Failures reported by the storage layer.
///
/// `EmptyResult` is the not-found signal for operations that target one
/// existing row; the service layer turns it into
/// [`AppError::ResourceNotFound`], every other variant passes through.
#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    Connection(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Empty result: {0}")]
    EmptyResult(String),
    #[error("Duplicate key: {0}")]
    Duplicate(String),
    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingEnvVar(String),
    #[error("Cannot parse {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level error for the service layer and HTTP surface.
///
/// `ResourceNotFound` is the only domain-level failure: the service maps the
/// storage layer's [`DatabaseError::EmptyResult`] onto it so callers never see
/// raw storage errors for missing rows.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: client {0}")]
    ResourceNotFound(ClientId),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::EmptyResult("no rows returned".to_string()),
            sqlx::Error::PoolTimedOut => {
                Self::PoolExhausted("timed out acquiring a connection".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                Self::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) => Self::Query(db_err.message().to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}
