use lifeally::config::{ConfigLoader, LifeallyConfig};
use lifeally::llm::{GeminiClient, LlmClient};
use lifeally::ml::ModelRegistry;
use lifeally::pipeline::Pipeline;
use std::path::Path;
use std::sync::Arc;

/// Resolve the library configuration: an explicit file or the default
/// locations, then the environment. `models_dir` overrides the result.
pub fn load_config(
    config_file: Option<&Path>,
    models_dir: Option<&Path>,
) -> lifeally::Result<LifeallyConfig> {
    let mut loader = ConfigLoader::new();
    match config_file {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }
    loader.load_env();

    let mut config = loader.extract()?;
    if let Some(dir) = models_dir {
        config.models.dir = dir.to_path_buf();
    }
    Ok(config)
}

/// Loaded models plus the configuration needed to reach the language model.
pub struct CliContext {
    pub config: LifeallyConfig,
    pub registry: Arc<ModelRegistry>,
}

impl CliContext {
    pub fn new(config: LifeallyConfig) -> lifeally::Result<Self> {
        let registry = ModelRegistry::load_from_dir(&config.models.dir)?;
        tracing::debug!(
            models = registry.len(),
            dir = %config.models.dir.display(),
            "Model registry loaded"
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
        })
    }

    /// Pipeline backed by the configured Gemini model. Needs an API key.
    pub fn pipeline(&self) -> lifeally::Result<Pipeline> {
        let llm = GeminiClient::from_config(&self.config.llm)?;
        Ok(self.pipeline_with(Arc::new(llm)))
    }

    pub fn pipeline_with(&self, llm: Arc<dyn LlmClient>) -> Pipeline {
        Pipeline::new(self.registry.clone(), llm)
    }
}
