//! HTTP API server for the todo system.
//!
//! Provides REST endpoints for listing todos and driving their lifecycle,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod subscribers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{InMemoryTodoRepository, TodoRepository, TodoService};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::todos::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: TodoRepository>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/todos",
            get(routes::todos::list::<R>).post(routes::todos::create::<R>),
        )
        .route("/todos/{id}/complete", post(routes::todos::complete::<R>))
        .route("/todos/{id}/reopen", post(routes::todos::reopen::<R>))
        .route("/todos/{id}/archive", post(routes::todos::archive::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: an in-memory repository and a bus
/// with the event logger attached.
pub fn create_default_state() -> Arc<AppState<InMemoryTodoRepository>> {
    let todo_service = TodoService::in_memory();
    // The logger stays subscribed for the lifetime of the bus.
    let _logger = subscribers::log_events(todo_service.bus().as_ref());
    Arc::new(AppState { todo_service })
}
