//! Shared application state.
//!
//! One `AppState` is built at startup and handed to every request handler
//! through Axum's `State` extractor.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::domain::ClientRepository;

use super::service::ClientService;

/// Everything the HTTP layer needs to serve a request.
///
/// Handlers go through [`ClientService`] for business operations; the
/// repository is also exposed directly for probes that bypass the service.
/// All fields are `Arc`-wrapped and `Send + Sync`, so cloning the state per
/// request is cheap and safe across tasks.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
///
/// let repository = Arc::new(PostgresClientRepository::with_defaults(&url).await?);
/// let state = AppState::new(repository);
/// let router = create_router(Arc::new(state));
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Business operations over client records.
    pub service: Arc<ClientService>,

    /// Storage backend the service was wired with.
    pub repository: Arc<dyn ClientRepository>,

    /// Rendering handle for the Prometheus scrape endpoint, when a recorder
    /// was installed at startup.
    pub metrics: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Builds the state around a repository, wiring the service internally.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        let service = Arc::new(ClientService::new(Arc::clone(&repository)));

        Self {
            service,
            repository,
            metrics: None,
        }
    }

    /// Attaches a Prometheus rendering handle for the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: Arc<PrometheusHandle>) -> Self {
        self.metrics = Some(handle);
        self
    }
}
