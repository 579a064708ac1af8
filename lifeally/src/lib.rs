//! # Lifeally
//!
//! Routes free-text questions about a person's life to one of four domain
//! model ensembles (career, finance, health, relationship), turns the text
//! into feature vectors, runs every model of the domain and asks a language
//! model to phrase the combined insights as advice.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lifeally::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_models_dir("models")
//!         .with_memory_storage()
//!         .build()?;
//!     let lifeally = lifeally::init(config).await?;
//!
//!     let outcome = lifeally
//!         .predict(PredictRequest::new("career", "I scored 320 on the GRE, what are my chances?"))
//!         .await?;
//!     println!("{}", outcome.result_text);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **ml**: model artifacts loaded from disk at startup, one registry per process
//! - **llm**: the hosted language model used for extraction and advice
//! - **pipeline**: feature resolution, per-model inference with isolated failures, summary
//! - **storage**: users, queries, results and per-domain profile memory in SurrealDB
//! - **service**: the request flow tying storage and pipeline together

pub mod config;
pub mod domain;
pub mod llm;
pub mod logging;
pub mod ml;
pub mod pipeline;
pub mod service;
pub mod storage;

use std::sync::Arc;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, LifeallyConfig, LogLevel, StorageEngine};
    pub use crate::domain::{Domain, ModelKey};
    pub use crate::llm::{GeminiClient, LlmClient};
    pub use crate::ml::{ModelRegistry, Prediction, Predictor};
    pub use crate::pipeline::{Pipeline, PipelineOutput, Profile};
    pub use crate::service::{Lifeally, PredictOutcome, PredictRequest};
    pub use crate::storage::{LifeallyStore, StorageError};
    pub use crate::{LifeallyError, Result, init};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Lifeally operations
#[derive(Debug, thiserror::Error)]
pub enum LifeallyError {
    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error while loading or running a predictive model
    #[error("Model error: {0}")]
    Model(String),

    /// Error talking to the language model
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for LifeallyError {
    fn from(err: crate::config::ConfigError) -> Self {
        LifeallyError::Configuration(err.to_string())
    }
}

impl From<crate::ml::MlError> for LifeallyError {
    fn from(err: crate::ml::MlError) -> Self {
        LifeallyError::Model(err.to_string())
    }
}

impl From<crate::llm::LlmError> for LifeallyError {
    fn from(err: crate::llm::LlmError) -> Self {
        LifeallyError::Llm(err.to_string())
    }
}

/// Result type for Lifeally operations
pub type Result<T> = std::result::Result<T, LifeallyError>;

/// Initialize Lifeally from the provided configuration.
///
/// Sets up logging, opens storage, loads every model artifact from
/// `config.models.dir` and builds the Gemini client. Fails when an artifact is
/// missing or the API key is not configured.
pub async fn init(config: config::LifeallyConfig) -> Result<service::Lifeally> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let registry = ml::ModelRegistry::load_from_dir(&config.models.dir)?;
    tracing::info!(
        models = registry.len(),
        dir = %config.models.dir.display(),
        "Model registry loaded"
    );

    let llm: Arc<dyn llm::LlmClient> = Arc::new(llm::GeminiClient::from_config(&config.llm)?);

    init_with(config, Arc::new(registry), llm).await
}

/// Initialize Lifeally with an already-built registry and language model client.
///
/// Used by tests and by embedders that bring their own `LlmClient`.
pub async fn init_with(
    config: config::LifeallyConfig,
    registry: Arc<ml::ModelRegistry>,
    llm: Arc<dyn llm::LlmClient>,
) -> Result<service::Lifeally> {
    let storage = storage::create_storage_service(&config.storage).await?;
    let pipeline = pipeline::Pipeline::new(registry, llm);

    Ok(service::Lifeally::new(storage, pipeline, config))
}
