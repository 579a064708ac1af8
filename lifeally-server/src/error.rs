//! Error handling for the Lifeally server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lifeally::{LifeallyError, storage::StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or invalid credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Database(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Auth(_) => "authentication_error",
            ServerError::Forbidden(_) => "forbidden",
            ServerError::Database(_) => "database_error",
            ServerError::Validation(_) => "validation_error",
            ServerError::NotFound(_) => "not_found",
            ServerError::Conflict(_) => "conflict",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
        }
    }

    /// The message without the kind prefix
    pub fn detail(&self) -> &str {
        match self {
            ServerError::Auth(m)
            | ServerError::Forbidden(m)
            | ServerError::Database(m)
            | ServerError::Validation(m)
            | ServerError::NotFound(m)
            | ServerError::Conflict(m)
            | ServerError::BadRequest(m)
            | ServerError::Internal(m) => m,
        }
    }
}

impl From<LifeallyError> for ServerError {
    fn from(err: LifeallyError) -> Self {
        match err {
            LifeallyError::Validation(m) => ServerError::Validation(m),
            LifeallyError::NotFound(m) => ServerError::NotFound(m),
            LifeallyError::Storage(m) => ServerError::Database(m),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists(m) => ServerError::Conflict(m),
            StorageError::NotFound(m) => ServerError::NotFound(m),
            StorageError::Validation(m) => ServerError::Validation(m),
            other => ServerError::Database(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.detail().to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
