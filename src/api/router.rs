//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    create_client_handler, delete_client_handler, find_by_income_handler, get_client_handler,
    health_check_handler, list_clients_handler, liveness_handler, metrics_handler,
    readiness_handler, update_client_handler,
};

/// Create the application router
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    // Client routes
    let client_routes = Router::new()
        .route("/", get(list_clients_handler).post(create_client_handler))
        .route("/income", get(find_by_income_handler))
        .route(
            "/{id}",
            get(get_client_handler)
                .put(update_client_handler)
                .delete(delete_client_handler),
        );

    // Health routes
    let health_routes = Router::new()
        .route("/", get(health_check_handler))
        .route("/live", get(liveness_handler))
        .route("/ready", get(readiness_handler));

    Router::new()
        .nest("/clients", client_routes)
        .nest("/health", health_routes)
        .route("/metrics", get(metrics_handler))
        .layer(middleware)
        .with_state(app_state)
}
