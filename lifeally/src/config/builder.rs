//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for creating LifeallyConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: LifeallyConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: LifeallyConfig::default(),
        }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Use the embedded in-memory engine (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.engine = StorageEngine::Memory;
        self
    }

    /// Use the on-disk RocksDB engine under the data directory
    pub fn with_persistent_storage(mut self) -> Self {
        self.config.storage.engine = StorageEngine::RocksDb;
        self
    }

    /// Set the SurrealDB namespace and database.
    pub fn with_database(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.config.storage.namespace = namespace.into();
        self.config.storage.database = database.into();
        self
    }

    /// Set the directory holding the model artifacts.
    pub fn with_models_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.models.dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the language model API key.
    pub fn with_llm_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(key.into());
        self
    }

    /// Set the language model name.
    pub fn with_llm_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.model = model.into();
        self
    }

    /// Point the language model client at another endpoint.
    pub fn with_llm_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.llm.base_url = url.into();
        self
    }

    pub fn with_llm_temperature(mut self, temperature: f32) -> Self {
        self.config.llm.temperature = temperature;
        self
    }

    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.config.llm.timeout = timeout;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Create a configuration for development with an in-memory database.
    pub fn development() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for testing.
    ///
    /// In-memory storage, a test data directory and warn-level logging.
    pub fn testing() -> Self {
        Self::new()
            .with_memory_storage()
            .with_data_dir(PathBuf::from("./test_data"))
            .with_log_level(LogLevel::Warn)
    }

    /// Create a production configuration with persistent storage and JSON logs.
    pub fn production() -> Self {
        Self::new()
            .with_persistent_storage()
            .with_log_level(LogLevel::Info)
            .with_log_format(LogFormat::Json)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<LifeallyConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
