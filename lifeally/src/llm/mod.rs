//! Hosted language model access.
//!
//! The pipeline talks to the model through [`LlmClient`] so tests can script
//! replies; [`GeminiClient`] is the production implementation.

mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Errors from the language model client
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Client cannot be built from the configuration
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    /// Transport failure or timeout
    #[error("LLM request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("LLM API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Body could not be parsed
    #[error("Failed to parse LLM response: {0}")]
    ResponseParsing(String),

    /// The model returned no text
    #[error("LLM returned no content{}", .0.as_ref().map(|r| format!(" ({})", r)).unwrap_or_default())]
    EmptyResponse(Option<String>),
}

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// A text-in, text-out language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single user prompt and return the reply text, trimmed.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, reported as the pipeline's model version.
    fn model_name(&self) -> String;
}
