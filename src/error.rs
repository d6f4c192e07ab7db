//! Error types for the key-value service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Kv Error Enum ==
/// Unified error type for the service.
///
/// `NotFound` is a well-formed negative result rather than a failure; it only
/// becomes an error at the HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    /// Key absent from both cache and store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Malformed request, rejected before any I/O
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cache collaborator unreachable, erroring or past its deadline
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Store collaborator unreachable, erroring or past its deadline
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        // Callers only learn the classification, never the failing step.
        let (status, message) = match &self {
            KvError::NotFound(key) => (StatusCode::NOT_FOUND, format!("Key not found: {}", key)),
            KvError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            KvError::CacheUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Cache unavailable".to_string())
            }
            KvError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, KvError>;
