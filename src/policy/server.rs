//! Policy resolver HTTP service.
//!
//! # Endpoints
//! - `POST /config` - Resolve a version token to a caching decision
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{GetConfigRequest, PolicyDecision, VersionRule};
use crate::api::health_handler;

/// State shared by the resolver handlers.
#[derive(Clone)]
pub struct PolicyState {
    rule: Arc<VersionRule>,
}

/// Handler for POST /config
pub async fn get_config_handler(
    State(state): State<PolicyState>,
    Json(req): Json<GetConfigRequest>,
) -> Json<PolicyDecision> {
    let use_cache = state.rule.use_cache(&req.version);
    info!("Resolved version '{}' -> use_cache={}", req.version, use_cache);
    Json(PolicyDecision::new(use_cache))
}

/// Creates the resolver router for `rule`.
pub fn create_policy_router(rule: VersionRule) -> Router {
    let state = PolicyState {
        rule: Arc::new(rule),
    };

    Router::new()
        .route("/config", post(get_config_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
