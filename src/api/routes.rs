//! API Routes
//!
//! Configures the Axum router with all todo service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_handler, health_handler, list_handler, stats_handler,
    update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// `/todos/all` is a static segment and takes precedence over `/todos/:id`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/todos", post(create_handler))
        .route("/todos/all", get(list_handler))
        .route(
            "/todos/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
