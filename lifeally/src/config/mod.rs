//! Configuration system for Lifeally.
//!
//! Configuration is layered: built-in defaults, then an optional file, then
//! environment variables. The raw `GEMINI_API_KEY` and `GEMINI_MODEL_NAME`
//! variables are honoured as well.

mod builder;
mod loader;
mod models;
#[cfg(test)]
mod tests;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "lifeally.toml",
    "lifeally.yaml",
    "lifeally.yml",
    "lifeally.json",
    ".lifeally/config.toml",
    ".lifeally/config.yaml",
    ".lifeally/config.yml",
    ".lifeally/config.json",
];

/// Environment variable prefix for Lifeally configuration
pub const ENV_PREFIX: &str = "LIFEALLY_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
