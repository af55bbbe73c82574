//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": ...}` JSON bodies with the matching
//! status code. Persistence failures are logged and collapsed to a generic
//! message; their cause never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged). `action` completes the sentence
    /// "An error occurred while ..."
    Database { action: &'static str, source: DbError },
}

impl ApiError {
    /// Persistence failure while doing `action`.
    pub fn database(action: &'static str, source: DbError) -> Self {
        Self::Database { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Database { action, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "Database error while {}", action);
                format!("An error occurred while {}.", action)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::database("processing the request", e)
    }
}
