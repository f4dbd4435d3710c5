//! API Handlers
//!
//! HTTP request handlers for each todo service endpoint. Handlers validate
//! input and delegate to the [`TodoCoordinator`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::cache::{CacheBackend, MemoryCache};
use crate::config::Config;
use crate::coordinator::TodoCoordinator;
use crate::error::{AppError, Result};
use crate::models::{
    CreateTodoRequest, DeleteResponse, HealthResponse, StatsResponse, Todo, UpdateTodoRequest,
};
use crate::policy::{HttpPolicyClient, PolicyGateway, StaticPolicy};
use crate::store::{SqliteTodoStore, TodoRepository};

/// Header carrying the caller's version token.
pub const CLIENT_VERSION_HEADER: &str = "x-client-version";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<TodoCoordinator>,
    /// Cache backend, for the stats endpoint
    pub cache: Arc<dyn CacheBackend>,
    /// Version token used when a request carries none
    pub default_client_version: String,
}

impl AppState {
    /// Creates state from already-built parts.
    pub fn new(
        coordinator: Arc<TodoCoordinator>,
        cache: Arc<dyn CacheBackend>,
        default_client_version: impl Into<String>,
    ) -> Self {
        Self {
            coordinator,
            cache,
            default_client_version: default_client_version.into(),
        }
    }

    /// Wires the SQLite store, the given in-memory cache and the policy
    /// gateway selected by `config`: the HTTP resolver client when
    /// `policy_url` is set, else the static gateway.
    pub fn from_config(config: &Config, cache: MemoryCache) -> Result<Self> {
        let store: Arc<dyn TodoRepository> = Arc::new(SqliteTodoStore::open(&config.database_path)?);
        let cache: Arc<dyn CacheBackend> = Arc::new(cache);
        let settings = config.cache_settings();

        let policy: Arc<dyn PolicyGateway> = match &config.policy_url {
            Some(url) => Arc::new(HttpPolicyClient::new(url, settings.policy_timeout)?),
            None => Arc::new(StaticPolicy::new(config.policy_default_use_cache)),
        };

        let coordinator = TodoCoordinator::new(store, Arc::clone(&cache), policy, settings);
        Ok(Self::new(
            Arc::new(coordinator),
            cache,
            config.default_client_version.clone(),
        ))
    }

    /// Version token from the header, else the `version` query parameter,
    /// else the configured default.
    fn client_version(&self, headers: &HeaderMap, query: &HashMap<String, String>) -> String {
        headers
            .get(CLIENT_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| query.get("version").cloned())
            .unwrap_or_else(|| self.default_client_version.clone())
    }
}

/// Parses a path id; anything but an integer is a validation failure.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid todo id '{}'", raw)))
}

/// Handler for POST /todos
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let todo = state.coordinator.create(req.into_new_todo()).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Handler for GET /todos/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Todo>> {
    let id = parse_id(&id)?;
    let version = state.client_version(&headers, &query);

    let todo = state.coordinator.get(id, &version).await?;
    Ok(Json(todo))
}

/// Handler for GET /todos/all
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Todo>>> {
    Ok(Json(state.coordinator.list().await?))
}

/// Handler for PUT /todos/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>> {
    let id = parse_id(&id)?;
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let todo = state.coordinator.update(id, req.into_changes()).await?;
    Ok(Json(todo))
}

/// Handler for DELETE /todos/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    state.coordinator.delete(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
