//! API implementation for the Lifeally HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    response::Json,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::ServerConfig, state::AppState};

pub mod admin;
pub mod auth;
pub mod auth_endpoints;
pub mod auth_service;
pub mod dto;
pub mod json;
pub mod predict;
pub mod users;

use auth::require_admin;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        health_check,
        auth_endpoints::register,
        auth_endpoints::login,
        predict::predict,
        users::delete_user,
        admin::list_users,
        admin::delete_user,
        admin::list_queries,
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            dto::PredictRequestDto,
            dto::PredictResponse,
            dto::UserDto,
            dto::UserPage,
            dto::QueryDto,
            dto::QueryPage,
            dto::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and capability reporting"),
        (name = "auth", description = "Registration and login"),
        (name = "predict", description = "The advice pipeline"),
        (name = "users", description = "User management"),
        (name = "admin", description = "Admin dashboard endpoints"),
    ),
    info(
        title = "Lifeally API",
        version = "1.0.0",
        description = "Routes life questions (career, finance, health, relationship) through domain model ensembles and returns language-model-written advice.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_router = Router::new()
        .route("/users/{id}", delete(users::delete_user))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/user/{id}", delete(admin::delete_user))
        .route("/admin/queries", get(admin::list_queries))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let api_router = Router::new()
        .route("/auth/register", post(auth_endpoints::register))
        .route("/auth/login", post(auth_endpoints::login))
        .route("/predict", post(predict::predict))
        .route("/health", get(health_check))
        .merge(admin_router)
        .with_state(state.clone());

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(root))
        .nest("/api", api_router)
        .merge(swagger_router)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins, with credentials
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("user-id"),
        ])
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = serde_json::Value)
    )
)]
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": lifeally::VERSION,
    }))
}

/// Health check endpoint with capability reporting
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health and capabilities", body = serde_json::Value)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let pipeline = state.lifeally.pipeline();
    let registry = pipeline.registry();
    let storage_ok = state.storage().health_check().await.unwrap_or(false);

    Json(serde_json::json!({
        "status": if storage_ok { "OK" } else { "DEGRADED" },
        "version": lifeally::VERSION,
        "capabilities": {
            "models_loaded": registry.len(),
            "models": registry.keys().map(|key| key.as_str()).collect::<Vec<_>>(),
            "llm_model": pipeline.model_version(),
            "storage": storage_ok,
            "admin_signup": state.config.allow_admin_signup,
        }
    }))
}
