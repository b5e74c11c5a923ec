//! Concrete database implementations.
//!
//! This module contains production-ready storage adapters that implement
//! the `ClientRepository` trait defined in the domain layer.

pub mod postgres;

pub use postgres::{PostgresClientRepository, PostgresConfig};
