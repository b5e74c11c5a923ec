//! Client registry service
//!
//! CRUD for a registry of clients: paged, sortable listings, an exact-income
//! filter, and single-record lookup, create, update, and delete backed by
//! PostgreSQL. Storage hides behind the [`domain::ClientRepository`] trait,
//! so the service layer and the whole HTTP surface can be exercised against
//! the in-memory mock in [`test_utils`].
//!
//! # Layout
//!
//! ```text
//! api      axum handlers and routing, query parsing, error-to-status mapping
//! app      ClientService (business logic, entity/DTO boundary) and AppState
//! domain   entity, DTO, page types, repository trait, errors; depends on nothing above
//! infra    sqlx/PostgreSQL adapter, environment config, tracing and metrics setup
//! ```
//!
//! Requests flow api → app → domain trait → infra. A missing row anywhere
//! surfaces as [`domain::AppError::ResourceNotFound`], which the API layer
//! renders as a 404 with a structured error body; storage errors below the
//! service keep their own [`domain::DatabaseError`] type.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use client_service::api::create_router;
//! use client_service::app::AppState;
//! use client_service::infra::PostgresClientRepository;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repository = Arc::new(PostgresClientRepository::with_defaults(&database_url).await?);
//!     let state = Arc::new(AppState::new(repository));
//!
//!     let router = create_router(state);
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Compiled unconditionally so integration tests and benches can use the
// mocks and fixtures.
pub mod test_utils;
