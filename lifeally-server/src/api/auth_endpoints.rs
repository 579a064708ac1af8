//! Registration and login endpoints

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use lifeally::storage::UserRole;

use crate::{
    api::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, normalize_email},
    api::auth_service::NewUser,
    api::json::ApiJson,
    error::{ServerError, bad_request},
    state::AppState,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// User registration endpoint
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    summary = "Register a new user account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Malformed body, missing fields or unknown role", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin signup disabled", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ServerError> {
    let name = non_blank(request.name);
    let email = non_blank(request.email).map(|e| normalize_email(&e));
    let password = request.password.filter(|p| !p.is_empty());

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(bad_request("Name, email and password are required"));
    };

    let role = match request.role.as_deref() {
        None => UserRole::User,
        Some(role) => role.parse::<UserRole>().map_err(|e| bad_request(&e))?,
    };
    if role == UserRole::Admin && !state.config.allow_admin_signup {
        return Err(ServerError::Forbidden(
            "Admin accounts cannot be registered".to_string(),
        ));
    }

    let user = state
        .auth_service
        .register(
            state.storage().as_ref(),
            NewUser {
                name,
                email,
                password,
                role,
            },
        )
        .await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
            email: user.email,
            name: user.name,
        }),
    ))
}

/// User login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    summary = "Authenticate and get a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body or missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let email = non_blank(request.email);
    let password = request.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(bad_request("Email and password are required"));
    };

    let (token, user, expires_at) = state
        .auth_service
        .authenticate(state.storage().as_ref(), &email, &password)
        .await?;
    tracing::info!(user_id = %user.id, "Successful login");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        user_id: user.id,
        role: user.role.to_string(),
        token,
        expires_at,
    }))
}
