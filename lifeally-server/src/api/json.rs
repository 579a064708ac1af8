//! JSON body extractor that answers in the API's error shape

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::error::ServerError;

/// Like [`axum::Json`], but a malformed or missing body becomes a
/// [`ServerError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ServerError::BadRequest("Invalid or missing JSON payload".to_string())
    }
}

