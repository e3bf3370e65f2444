//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
///
/// Cache operations themselves never fail except for reads of absent keys;
/// the invalid-input variants are raised by the key/assignment parsers
/// before a request reaches the store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No entry exists under the requested key
    #[error("Item {0} not found")]
    NotFound(String),

    /// Malformed textual item key
    #[error("Invalid item key: {0}")]
    InvalidKey(String),

    /// Malformed textual assignment
    #[error("Incorrect assignment {0}")]
    InvalidAssignment(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidAssignment(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
