//! The prediction endpoint

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use lifeally::service::PredictRequest;

use crate::{
    api::dto::{PredictRequestDto, PredictResponse},
    api::json::ApiJson,
    error::{ServerError, bad_request},
    state::AppState,
};

/// Run the advice pipeline for a query
#[utoipa::path(
    post,
    path = "/api/predict",
    tag = "predict",
    summary = "Route a query through a domain's models and get advice",
    request_body = PredictRequestDto,
    responses(
        (status = 201, description = "Query and advice stored; an unknown domain stores an 'Invalid domain' result", body = PredictResponse),
        (status = 400, description = "Malformed body or missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown user_id", body = crate::error::ErrorResponse),
    )
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PredictRequestDto>,
) -> Result<(StatusCode, Json<PredictResponse>), ServerError> {
    let domain = request.domain.filter(|d| !d.trim().is_empty());
    let text = request.text.filter(|t| !t.trim().is_empty());
    let (Some(domain), Some(text)) = (domain, text) else {
        return Err(bad_request("Both 'domain' and 'text' are required fields"));
    };

    let mut predict_request = PredictRequest::new(domain, text);
    if let Some(user_id) = request.user_id.filter(|id| !id.trim().is_empty()) {
        predict_request = predict_request.with_user(user_id);
    }

    let outcome = state.lifeally.predict(predict_request).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}
