//! Error types for the todo service
//!
//! Provides unified error handling using thiserror. Only `NotFound`,
//! `Validation` and `StoreUnavailable` are ever returned to HTTP callers;
//! cache and policy failures are absorbed by the coordinator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::CacheError;

// == App Error Enum ==
/// Unified error type for the todo service.
#[derive(Error, Debug)]
pub enum AppError {
    /// No item exists for the requested id
    #[error("Todo not found: {0}")]
    NotFound(i64),

    /// Request payload failed validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Backing store call failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Cache backend call failed
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    /// Policy resolver unreachable or returned an error
    #[error("Policy unavailable: {0}")]
    PolicyUnavailable(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::StoreUnavailable(format!("store task failed: {}", e))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CacheUnavailable(_) | AppError::PolicyUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the todo service.
pub type Result<T> = std::result::Result<T, AppError>;
