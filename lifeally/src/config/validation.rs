//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &LifeallyConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_models_config(&config.models)?;
    validate_llm_config(&config.llm)?;

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.engine == StorageEngine::RocksDb && config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    if config.namespace.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB namespace cannot be empty".to_string(),
        ));
    }
    if config.database.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "SurrealDB database cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_models_config(config: &ModelsConfig) -> Result<(), ConfigError> {
    if config.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_llm_config(config: &LlmConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM model name cannot be empty".to_string(),
        ));
    }

    if config.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM base URL cannot be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "LLM temperature must be between 0 and 2, got {}",
            config.temperature
        )));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::ValidationError(
            "LLM timeout must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
