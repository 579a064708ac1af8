//! Authentication and authorization for the Lifeally API

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ServerError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User role
    pub role: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

/// Caller identity placed in request extensions by [`require_admin`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub role: String,
}

/// User registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    pub name: Option<String>,
    /// Email (unique, compared case-insensitively)
    pub email: Option<String>,
    /// Password (will be hashed)
    pub password: Option<String>,
    /// `user` (default) or `admin`
    pub role: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
    pub role: String,
    /// Bearer token for admin endpoints
    pub token: String,
    /// Token expiration timestamp (seconds since the epoch)
    pub expires_at: i64,
}

/// Middleware for routes that need an admin caller.
///
/// 401 without a valid bearer token, 403 when the token's user is gone or
/// is not an admin.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| ServerError::Auth("Authentication required".to_string()))?;

    let auth_context = state
        .auth_service
        .authorize_admin(state.storage().as_ref(), bearer.token())
        .await?;
    tracing::debug!(user_id = %auth_context.user_id, "Admin request authorized");

    request.extensions_mut().insert(auth_context);
    Ok(next.run(request).await)
}

/// Validate a JWT token and return the authentication context
pub fn validate_jwt_token(token: &str, secret: &str) -> Result<AuthContext, ServerError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| ServerError::Auth(format!("Invalid token: {}", e)))?;

    Ok(AuthContext {
        user_id: token_data.claims.sub,
        role: token_data.claims.role,
    })
}

/// Generate a JWT token for a user
pub fn generate_jwt_token(
    user_id: &str,
    role: &str,
    secret: &str,
    expiration_hours: u64,
) -> Result<(String, i64), ServerError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = now + (expiration_hours * 3600) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok((token, exp as i64))
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServerError> {
    bcrypt::hash(password, cost)
        .map_err(|e| ServerError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Trimmed, lowercased email
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Generate a random password for the bootstrap admin
pub fn generate_admin_password() -> String {
    use rand::Rng;
    use rand::distr::Alphanumeric;
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
