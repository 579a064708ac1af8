//! Shared setup for the HTTP tests: in-memory storage, real model artifacts
//! and a language model that answers from a script.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use lifeally::domain::ModelKey;
use lifeally::llm::{LlmClient, LlmError};
use lifeally::ml::{Model, ModelArtifact, ModelRegistry};
use lifeally_server::{AppState, config::ServerConfig, create_router};
use serde_json::{Value, json};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const ADVICE: &str = "Keep a steady sleep schedule! 😴";

#[derive(Debug)]
pub struct ScriptedLlm;

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.starts_with("You are an expert AI assistant.") {
            Ok("45, 6".to_string())
        } else {
            Ok(ADVICE.to_string())
        }
    }

    fn model_name(&self) -> String {
        "gemini-test".to_string()
    }
}

fn model(json: &str) -> Arc<Model> {
    let artifact = ModelArtifact::from_json(json).expect("artifact should parse");
    Arc::new(Model::from_artifact(artifact).expect("artifact should validate"))
}

pub fn health_registry() -> ModelRegistry {
    ModelRegistry::new()
        .with_model(
            ModelKey::HealthMental,
            model(
                r#"{
                    "name": "mental_health",
                    "features": [{"name": "age"}, {"name": "sleep_hours"}],
                    "estimator": {"type": "linear_regressor", "coefficients": [0.01, -0.1], "intercept": 1.0}
                }"#,
            ),
        )
        .with_model(
            ModelKey::HealthHeart,
            model(
                r#"{
                    "name": "heart_health",
                    "estimator": {"type": "text_knn", "k": 1, "documents": [
                        {"text": "chest pain when running", "label": "see a cardiologist"},
                        {"text": "I sleep badly and feel tired", "label": "low risk"}
                    ]}
                }"#,
            ),
        )
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

pub async fn test_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let config = lifeally::config::ConfigBuilder::testing()
        .build()
        .expect("Failed to create config");

    let lifeally = lifeally::init_with(config, Arc::new(health_registry()), Arc::new(ScriptedLlm))
        .await
        .expect("Failed to initialize lifeally");

    let mut server_config = ServerConfig {
        jwt_secret: "test-secret-key-for-jwt-token-generation".to_string(),
        password_hash_cost: 4,
        ..Default::default()
    };
    configure(&mut server_config);

    let state = Arc::new(AppState::new(lifeally, server_config));
    let server = TestServer::new(create_router(state.clone())).expect("Failed to create test server");

    TestApp { server, state }
}

pub async fn test_app() -> TestApp {
    test_app_with(|_| {}).await
}

impl TestApp {
    /// Register a regular user and return its id
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({"name": name, "email": email, "password": password}))
            .await;
        response.assert_status(http::StatusCode::CREATED);
        response.json::<Value>()["user_id"]
            .as_str()
            .expect("user_id in response")
            .to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    /// Create the bootstrap admin and log in as it
    pub async fn admin_token(&self) -> String {
        self.state
            .auth_service
            .bootstrap_admin(
                self.state.storage().as_ref(),
                ADMIN_EMAIL,
                Some(ADMIN_PASSWORD.to_string()),
            )
            .await
            .expect("Failed to create admin");
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }
}
