//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::DatabaseError;
use super::types::{Client, ClientId, Page, PageRequest};

/// Persistence contract for client records.
///
/// Implementations speak in storage-level errors; mapping a missing row onto
/// the domain's not-found error is the service layer's job. Methods that
/// target a single existing row ([`fetch_for_update`], [`delete_by_id`])
/// signal a missing row with [`DatabaseError::EmptyResult`], while the plain
/// lookup [`find_by_id`] reports absence as `Ok(None)`.
///
/// [`fetch_for_update`]: ClientRepository::fetch_for_update
/// [`delete_by_id`]: ClientRepository::delete_by_id
/// [`find_by_id`]: ClientRepository::find_by_id
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Check storage connectivity
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Get a single client by id, `None` when absent
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DatabaseError>;

    /// List clients with offset pagination and optional ordering
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Client>, DatabaseError>;

    /// List clients whose income matches the given value exactly
    async fn find_by_income(
        &self,
        income: f64,
        page: &PageRequest,
    ) -> Result<Page<Client>, DatabaseError>;

    /// Insert (id absent) or overwrite (id present) a client, returning the
    /// persisted row with its id filled in
    async fn save(&self, client: &Client) -> Result<Client, DatabaseError>;

    /// Load an existing client as the starting point for an update
    async fn fetch_for_update(&self, id: ClientId) -> Result<Client, DatabaseError>;

    /// Delete a client by id
    async fn delete_by_id(&self, id: ClientId) -> Result<(), DatabaseError>;
}
