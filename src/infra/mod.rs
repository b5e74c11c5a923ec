//! Infrastructure layer implementations.

pub mod config;
pub mod database;
pub mod observability;

pub use config::AppConfig;
pub use database::{PostgresClientRepository, PostgresConfig};
pub use observability::{PrometheusHandle, init_metrics, init_metrics_handle, init_tracing};
