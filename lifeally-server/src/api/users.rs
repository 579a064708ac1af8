//! User management endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::dto::MessageResponse,
    error::{ServerError, ServerResult},
    state::AppState,
};

/// Delete a non-admin user with all their queries, results and profile memory.
pub(crate) async fn remove_user(state: &AppState, id: &str) -> ServerResult<()> {
    let storage = state.storage();
    let user = storage
        .get_user(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    if user.is_admin() {
        tracing::warn!(user_id = %user.id, email = %user.email, "Attempt to delete admin account via API");
        return Err(ServerError::Forbidden(
            "Cannot delete admin accounts via API".to_string(),
        ));
    }

    if !storage.delete_user(id).await? {
        return Err(ServerError::NotFound("User not found".to_string()));
    }
    tracing::info!(user_id = %id, "User deleted");
    Ok(())
}

/// Delete user endpoint (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    summary = "Delete a user and everything they own",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin, or target is an admin", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    remove_user(&state, &id).await?;
    Ok(Json(MessageResponse::new(
        "User and all related queries/results deleted",
    )))
}
