//! HTTP request handlers.
//!
//! Handlers stay thin: they parse the request shape, delegate to the
//! service, and let [`AppError`]'s `IntoResponse` impl pick the status code.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;

use crate::app::AppState;
use crate::domain::{
    AppError, ClientDto, ClientId, DatabaseError, ErrorDetail, ErrorResponse, HealthResponse,
    HealthStatus, Page, PageRequest, SortDirection, SortField,
};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters accepted by the list endpoints.
///
/// A sort only applies when `sort` names a field; a bare `direction` is
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl PageParams {
    /// Converts the raw query into a domain page request, clamping the size
    /// into `1..=MAX_PAGE_SIZE`.
    fn into_page_request(self) -> PageRequest {
        let page = self.page.unwrap_or(0);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let mut request = PageRequest::new(page, size);
        if let Some(field) = self.sort {
            request = request.with_sort(field, self.direction.unwrap_or_default());
        }
        request
    }
}

/// Required query parameter for the income filter endpoint.
#[derive(Debug, Deserialize)]
pub struct IncomeParam {
    pub income: f64,
}

/// List clients one page at a time
pub async fn list_clients_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ClientDto>>, AppError> {
    let request = params.into_page_request();
    let clients = state.service.find_all_paged(&request).await?;
    Ok(Json(clients))
}

/// List clients whose income matches the query exactly
pub async fn find_by_income_handler(
    State(state): State<Arc<AppState>>,
    Query(income): Query<IncomeParam>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ClientDto>>, AppError> {
    let request = params.into_page_request();
    let clients = state
        .service
        .find_by_income(&request, income.income)
        .await?;
    Ok(Json(clients))
}

/// Get a single client by id
pub async fn get_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, AppError> {
    let client = state.service.find_by_id(id).await?;
    Ok(Json(client))
}

/// Create a new client
pub async fn create_client_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ClientDto>,
) -> Result<(StatusCode, Json<ClientDto>), AppError> {
    let created = state.service.insert(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace every data field of an existing client
pub async fn update_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ClientId>,
    Json(payload): Json<ClientDto>,
) -> Result<Json<ClientDto>, AppError> {
    let updated = state.service.update(id, &payload).await?;
    Ok(Json(updated))
}

/// Delete a client
pub async fn delete_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, AppError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Detailed health check
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

/// Kubernetes liveness probe
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health_check().await;
    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Prometheus scrape endpoint
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> axum::response::Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_IMPLEMENTED.into_response(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type, message) = match &self {
            AppError::ResourceNotFound(_) => {
                (StatusCode::NOT_FOUND, "not_found", self.to_string())
            }
            AppError::Database(db_err) => match db_err {
                DatabaseError::Connection(_) | DatabaseError::PoolExhausted(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "database_error",
                    self.to_string(),
                ),
                DatabaseError::EmptyResult(_) => {
                    (StatusCode::NOT_FOUND, "not_found", self.to_string())
                }
                DatabaseError::Duplicate(_) => {
                    (StatusCode::CONFLICT, "duplicate", self.to_string())
                }
                DatabaseError::Query(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    self.to_string(),
                ),
            },
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                self.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let request = PageParams::default().into_page_request();

        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert!(request.sort.is_none());
    }

    #[test]
    fn test_page_params_clamps_size() {
        let oversized = PageParams {
            size: Some(5000),
            ..Default::default()
        };
        assert_eq!(oversized.into_page_request().size, MAX_PAGE_SIZE);

        let zero = PageParams {
            size: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.into_page_request().size, 1);
    }

    #[test]
    fn test_page_params_direction_without_sort_is_ignored() {
        let params = PageParams {
            direction: Some(SortDirection::Desc),
            ..Default::default()
        };
        assert!(params.into_page_request().sort.is_none());
    }

    #[test]
    fn test_page_params_sort_defaults_to_ascending() {
        let params = PageParams {
            sort: Some(SortField::Name),
            ..Default::default()
        };

        let sort = params.into_page_request().sort.unwrap();
        assert_eq!(sort.field, SortField::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_error_status_mapping() {
        let not_found = AppError::ResourceNotFound(1).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict =
            AppError::Database(DatabaseError::Duplicate("tax_id".to_string())).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let unavailable =
            AppError::Database(DatabaseError::Connection("down".to_string())).into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let internal =
            AppError::Database(DatabaseError::Query("syntax".to_string())).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
