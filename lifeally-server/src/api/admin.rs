//! Admin dashboard endpoints

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use lifeally::storage::QueryFilter;

use crate::{
    api::dto::{MessageResponse, PaginationParams, QueryDto, QueryListParams, QueryPage, UserDto, UserPage},
    api::users::remove_user,
    error::ServerError,
    state::AppState,
};

/// List users endpoint (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    summary = "List users, newest first",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UserPage>, ServerError> {
    let page = state
        .storage()
        .list_users(params.to_pagination())
        .await?
        .map(UserDto::from);

    Ok(Json(UserPage {
        items: page.items,
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Delete user endpoint (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/user/{id}",
    tag = "admin",
    summary = "Delete a user from the dashboard",
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
    Ok(Json(MessageResponse::new("User deleted")))
}

/// List queries endpoint (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/queries",
    tag = "admin",
    summary = "List stored queries with owner email and latest advice",
    params(QueryListParams),
    responses(
        (status = 200, description = "One page of queries", body = QueryPage),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_queries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryListParams>,
) -> Result<Json<QueryPage>, ServerError> {
    let storage = state.storage();
    let filter = QueryFilter {
        domain: params.domain.clone().filter(|d| !d.is_empty()),
        user_id: params.user_id.clone().filter(|u| !u.is_empty()),
    };
    let page = storage.list_queries(filter, params.to_pagination()).await?;

    let mut emails: HashMap<String, Option<String>> = HashMap::new();
    let mut items = Vec::with_capacity(page.items.len());
    for query in page.items {
        let user_email = match &query.user_id {
            Some(user_id) => {
                if !emails.contains_key(user_id) {
                    let email = storage.get_user(user_id).await?.map(|user| user.email);
                    emails.insert(user_id.clone(), email);
                }
                emails.get(user_id).cloned().flatten()
            }
            None => None,
        };
        let latest_result = storage
            .latest_result(&query.id)
            .await?
            .map(|result| result.result_text);

        items.push(QueryDto::new(query, user_email, latest_result));
    }

    Ok(Json(QueryPage {
        items,
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }))
}
