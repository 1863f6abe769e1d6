mod handlers;
pub mod models;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use delegator_core::{RunLog, TaskExecutor};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<TaskExecutor>,
    pub run_log: Arc<dyn RunLog>,
}

impl AppState {
    pub fn new(executor: TaskExecutor, run_log: Arc<dyn RunLog>) -> Self {
        Self {
            executor: Arc::new(executor),
            run_log,
        }
    }
}

/// Build the complete API router.
///
/// CORS mirrors any origin, method and header (credentials allowed); there
/// is no authentication.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/task", get(handlers::run_task))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
