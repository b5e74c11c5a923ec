//! Application service layer.
//!
//! This module contains the core business logic that sits between the HTTP
//! surface and the storage abstraction. It owns the entity/DTO boundary and
//! the translation of storage-level errors into domain errors.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, Client, ClientDto, ClientId, ClientRepository, DatabaseError, HealthResponse,
    HealthStatus, Page, PageRequest,
};

/// Application service containing core business logic.
///
/// Every operation accepts and returns DTOs; entities never cross this
/// boundary. The service holds the repository behind a trait object,
/// enabling dependency injection and testability.
///
/// # Example
///
/// ```ignore
/// let repository = Arc::new(PostgresClientRepository::with_defaults(&url).await?);
/// let service = ClientService::new(repository);
///
/// let client = service.find_by_id(1).await?;
/// ```
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a new `ClientService` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - Storage backend for client records.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Gets one page of clients.
    #[instrument(skip(self))]
    pub async fn find_all_paged(&self, page: &PageRequest) -> Result<Page<ClientDto>, AppError> {
        let clients = self.repository.find_all(page).await?;
        Ok(clients.map(ClientDto::from))
    }

    /// Gets one page of clients whose income matches `income` exactly.
    #[instrument(skip(self))]
    pub async fn find_by_income(
        &self,
        page: &PageRequest,
        income: f64,
    ) -> Result<Page<ClientDto>, AppError> {
        let clients = self.repository.find_by_income(income, page).await?;
        Ok(clients.map(ClientDto::from))
    }

    /// Gets a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceNotFound`] when no client has this id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ClientId) -> Result<ClientDto, AppError> {
        info!(client_id = %id, "Fetching client");
        let client = self.repository.find_by_id(id).await?;
        client
            .map(ClientDto::from)
            .ok_or_else(|| Self::not_found(id))
    }

    /// Creates a new client from the given data.
    ///
    /// Any id carried by the DTO is discarded so storage always assigns a
    /// fresh one; the returned DTO carries the assigned id.
    #[instrument(skip(self, dto), fields(client_name = %dto.name))]
    pub async fn insert(&self, dto: &ClientDto) -> Result<ClientDto, AppError> {
        info!("Creating new client: {}", dto.name);

        let mut entity = dto.to_entity();
        entity.id = None;

        let created = self.repository.save(&entity).await?;
        info!(client_id = ?created.id, "Client created in storage");
        counter!("clients_created_total").increment(1);

        Ok(ClientDto::from(created))
    }

    /// Replaces every data field of an existing client.
    ///
    /// This method orchestrates the following workflow:
    /// 1. Loads the current entity for the given id
    /// 2. Applies the incoming data onto it, keeping the stored id
    /// 3. Persists the merged entity and returns the refreshed DTO
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceNotFound`] when no client has this id;
    /// in that case nothing is written.
    #[instrument(skip(self, dto), fields(client_id = %id))]
    pub async fn update(&self, id: ClientId, dto: &ClientDto) -> Result<ClientDto, AppError> {
        let mut entity = self
            .repository
            .fetch_for_update(id)
            .await
            .map_err(|e| Self::missing_row_to_not_found(e, id))?;

        dto.apply_to(&mut entity);

        let updated = self.repository.save(&entity).await?;
        info!(client_id = %id, "Client updated");

        Ok(ClientDto::from(updated))
    }

    /// Deletes a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceNotFound`] when no client has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ClientId) -> Result<(), AppError> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(|e| Self::missing_row_to_not_found(e, id))?;

        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    /// Performs a health check on the storage backend.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let db_health = match self.repository.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = ?e, "Database health check failed");
                HealthStatus::Unhealthy
            }
        };

        HealthResponse::new(db_health)
    }

    fn not_found(id: ClientId) -> AppError {
        warn!(client_id = %id, "Client not found");
        counter!("client_not_found_total").increment(1);
        AppError::ResourceNotFound(id)
    }

    /// Maps the storage layer's empty-result signal onto the domain error;
    /// every other storage failure passes through untouched.
    fn missing_row_to_not_found(err: DatabaseError, id: ClientId) -> AppError {
        match err {
            DatabaseError::EmptyResult(_) => Self::not_found(id),
            other => AppError::Database(other),
        }
    }
}
