//! Error types for catalog-api
//!
//! Every error body carries a `detail` key: a message string, or a list of
//! field-level problems for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One problem with one input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, e.g. `["body", "tags", "2"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Required field absent or null
    pub fn missing(loc: &[&str]) -> Self {
        Self::new(loc, "Field required", "missing")
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed field validation (422)
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Request could not be parsed at all (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload could not be written to disk (500)
    #[error("Storage error: {0}")]
    Storage(std::io::Error),

    /// catalog-common error
    #[error("Common error: {0}")]
    Common(catalog_common::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<catalog_common::Error> for ApiError {
    fn from(err: catalog_common::Error) -> Self {
        match err {
            catalog_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Common(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg)),
            ApiError::Validation(errors) => (StatusCode::UNPROCESSABLE_ENTITY, json!(errors)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            ApiError::Storage(ref err) => {
                tracing::error!("Upload storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!(format!("Failed to store upload: {}", err)),
                )
            }
            ApiError::Common(ref err) => {
                tracing::error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, json!(err.to_string()))
            }
            ApiError::Other(ref err) => {
                tracing::error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, json!(err.to_string()))
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
