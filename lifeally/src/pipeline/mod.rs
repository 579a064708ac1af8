//! The query pipeline: resolve features, run every model of a domain,
//! summarise and ask the language model for advice.
//!
//! Each model runs in isolation. A model that cannot get its inputs or fails
//! to predict is recorded as failed and the others carry on; the pipeline as
//! a whole always produces an output.

pub mod features;
mod profile;
pub mod summary;

pub use features::{
    FeatureSource, ResolvedFeatures, extract_structured_features, get_model_features,
    is_structured_input, update_profile_with_features,
};
pub use profile::{Profile, UNKNOWN_VALUE, is_known_value};

use crate::domain::{Domain, ModelKey};
use crate::llm::{LlmClient, LlmError, prompt};
use crate::ml::{MlError, ModelRegistry, Prediction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Advice text used when the language model cannot be reached.
pub const LLM_FAILURE_ADVICE: &str =
    "Sorry, there was an error with the LLM. Please try again later.";

/// Why a single model produced no prediction.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("model {0} is not loaded")]
    ModelUnavailable(ModelKey),

    #[error("extraction did not yield {expected} values")]
    ExtractionMismatch { expected: usize },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Model(#[from] MlError),
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Advice from the language model, or the fixed failure text
    pub result_text: String,

    /// Prediction per model key; `null` for models that failed
    pub raw_output: BTreeMap<ModelKey, Option<Prediction>>,

    /// Name of the language model
    pub model_version: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub model_prediction_success: BTreeMap<ModelKey, bool>,

    /// Incoming profile plus every informative feature value seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_profile: Option<Profile>,
}

impl PipelineOutput {
    fn invalid_domain(domain: &str, model_version: String) -> Self {
        Self {
            result_text: format!("Invalid domain: {}", domain),
            raw_output: BTreeMap::new(),
            model_version,
            model_prediction_success: BTreeMap::new(),
            updated_profile: None,
        }
    }

    /// Keys of the models that failed.
    pub fn failed_models(&self) -> Vec<ModelKey> {
        self.model_prediction_success
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Model registry plus language model.
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<ModelRegistry>,
    llm: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("models", &self.registry.len())
            .field("llm", &self.llm.model_name())
            .finish()
    }
}

impl Pipeline {
    pub fn new(registry: Arc<ModelRegistry>, llm: Arc<dyn LlmClient>) -> Self {
        Self { registry, llm }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Reported as `model_version` in every output.
    pub fn model_version(&self) -> String {
        self.llm.model_name()
    }

    /// Run the pipeline for a domain given by name.
    ///
    /// Unknown domains produce an output whose text is `Invalid domain: <name>`.
    pub async fn run(&self, query: &str, domain: &str, profile: Option<&Profile>) -> PipelineOutput {
        match domain.parse::<Domain>() {
            Ok(domain) => self.run_domain(query, domain, profile).await,
            Err(_) => {
                tracing::warn!(domain, "Pipeline called with an invalid domain");
                PipelineOutput::invalid_domain(domain, self.model_version())
            }
        }
    }

    #[tracing::instrument(skip_all, fields(domain = %domain))]
    pub async fn run_domain(
        &self,
        query: &str,
        domain: Domain,
        profile: Option<&Profile>,
    ) -> PipelineOutput {
        let mut raw_output = BTreeMap::new();
        let mut success = BTreeMap::new();
        let mut updated_profile = profile.cloned().unwrap_or_default();

        for &key in domain.model_keys() {
            match self.run_model(key, query, profile).await {
                Ok((prediction, resolved)) => {
                    if resolved.source != FeatureSource::Query
                        && let Some(names) = self.registry.feature_names(key)
                    {
                        update_profile_with_features(&mut updated_profile, &names, &resolved.values);
                    }
                    raw_output.insert(key, Some(prediction));
                    success.insert(key, true);
                }
                Err(e) => {
                    tracing::warn!(model = %key, error = %e, "Model produced no prediction");
                    raw_output.insert(key, None);
                    success.insert(key, false);
                }
            }
        }

        let summary = summary::build_summary(&raw_output, &success);
        let advice_prompt = prompt::advice_prompt(query, domain.as_str(), &summary);
        let result_text = match self.llm.complete(&advice_prompt).await {
            Ok(advice) => advice.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Advice generation failed");
                LLM_FAILURE_ADVICE.to_string()
            }
        };

        tracing::info!(
            succeeded = success.values().filter(|ok| **ok).count(),
            failed = success.values().filter(|ok| !**ok).count(),
            "Pipeline run complete"
        );

        PipelineOutput {
            result_text,
            raw_output,
            model_version: self.model_version(),
            model_prediction_success: success,
            updated_profile: Some(updated_profile),
        }
    }

    /// Resolve inputs and predict for one model. Features are always
    /// resolved against the incoming profile.
    async fn run_model(
        &self,
        key: ModelKey,
        query: &str,
        profile: Option<&Profile>,
    ) -> Result<(Prediction, ResolvedFeatures), PipelineError> {
        let model = self
            .registry
            .get(key)
            .ok_or(PipelineError::ModelUnavailable(key))?;

        let resolved =
            get_model_features(self.llm.as_ref(), query, model.feature_names(), profile).await?;
        tracing::debug!(model = %key, source = %resolved.source, "Resolved model features");

        let prediction = model.predict(&resolved.values)?;
        Ok((prediction, resolved))
    }
}
