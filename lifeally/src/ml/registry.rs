//! The process-wide set of loaded models.

use super::error::{MlError, Result};
use super::{Model, ModelArtifact, Predictor};
use crate::domain::ModelKey;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Models keyed by [`ModelKey`]. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelKey, Arc<dyn Predictor>>,
}

impl ModelRegistry {
    /// An empty registry; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every model artifact from `dir`.
    ///
    /// Fails with [`MlError::ModelNotFound`] on the first missing artifact.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        for key in ModelKey::ALL {
            let path = dir.join(key.artifact_file());
            if !path.is_file() {
                return Err(MlError::model_not_found(path.display()));
            }

            let json = std::fs::read_to_string(&path)?;
            let artifact = ModelArtifact::from_json(&json).map_err(|e| {
                MlError::invalid_artifact(format!("{}: {}", path.display(), e))
            })?;
            let model = Model::from_artifact(artifact)?;

            tracing::debug!(
                model = %key,
                name = model.name(),
                version = model.version().unwrap_or("-"),
                text_model = model.feature_names().is_none(),
                "Loaded model artifact"
            );
            registry.insert(key, Arc::new(model));
        }

        Ok(registry)
    }

    /// Register (or replace) the model for `key`.
    pub fn insert(&mut self, key: ModelKey, model: Arc<dyn Predictor>) {
        self.models.insert(key, model);
    }

    pub fn with_model(mut self, key: ModelKey, model: Arc<dyn Predictor>) -> Self {
        self.insert(key, model);
        self
    }

    pub fn get(&self, key: ModelKey) -> Option<Arc<dyn Predictor>> {
        self.models.get(&key).cloned()
    }

    /// Input columns of the model, `None` for text models or unknown keys.
    pub fn feature_names(&self, key: ModelKey) -> Option<Vec<String>> {
        self.models
            .get(&key)
            .and_then(|model| model.feature_names().map(<[String]>::to_vec))
    }

    pub fn contains(&self, key: ModelKey) -> bool {
        self.models.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ModelKey> + '_ {
        self.models.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
