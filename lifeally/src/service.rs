//! The request flow: persistence around one pipeline run.

use crate::config::LifeallyConfig;
use crate::pipeline::{Pipeline, PipelineOutput, Profile};
use crate::storage::{LifeallyStore, PredictionResult, UserQuery};
use crate::{LifeallyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A question to run through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub domain: String,
    pub text: String,
    /// Known user; enables profile memory
    #[serde(default)]
    pub user_id: Option<String>,
}

impl PredictRequest {
    pub fn new(domain: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            text: text.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// What a prediction returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictOutcome {
    pub query_id: String,
    pub prediction_id: String,
    pub result_text: String,
    pub model_version: String,
    /// Models report no confidence; always `None`
    pub confidence: Option<f64>,
    pub profile_memory: Option<Profile>,
    /// Per-model success flags, for callers that want them
    #[serde(skip)]
    pub model_prediction_success: BTreeMap<crate::domain::ModelKey, bool>,
}

/// Storage, pipeline and configuration of a running instance.
#[derive(Clone)]
pub struct Lifeally {
    storage: Arc<dyn LifeallyStore>,
    pipeline: Pipeline,
    config: LifeallyConfig,
}

impl std::fmt::Debug for Lifeally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifeally")
            .field("storage", &self.storage)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl Lifeally {
    pub fn new(storage: Arc<dyn LifeallyStore>, pipeline: Pipeline, config: LifeallyConfig) -> Self {
        Self {
            storage,
            pipeline,
            config,
        }
    }

    pub fn storage(&self) -> &Arc<dyn LifeallyStore> {
        &self.storage
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &LifeallyConfig {
        &self.config
    }

    /// Persist the query, run the pipeline with the user's profile memory,
    /// store the refreshed memory and the advice.
    #[tracing::instrument(skip_all, fields(domain = %request.domain, user_id = ?request.user_id))]
    pub async fn predict(&self, request: PredictRequest) -> Result<PredictOutcome> {
        let domain = request.domain.trim();
        let text = request.text.as_str();
        if domain.is_empty() || text.trim().is_empty() {
            return Err(LifeallyError::Validation(
                "Both 'domain' and 'text' are required fields".to_string(),
            ));
        }

        if let Some(user_id) = &request.user_id
            && self.storage.get_user(user_id).await?.is_none()
        {
            return Err(LifeallyError::NotFound(
                "User not found for provided user_id".to_string(),
            ));
        }

        let profile = match &request.user_id {
            Some(user_id) => Some(
                self.storage
                    .get_profile_memory(user_id, domain)
                    .await?
                    .map(|memory| memory.profile)
                    .unwrap_or_default(),
            ),
            None => None,
        };

        let query = self
            .storage
            .create_query(UserQuery::new(request.user_id.clone(), domain, text))
            .await?;

        let PipelineOutput {
            result_text,
            model_version,
            model_prediction_success,
            updated_profile,
            ..
        } = self.pipeline.run(text, domain, profile.as_ref()).await;

        if let (Some(user_id), Some(updated)) = (&request.user_id, &updated_profile) {
            self.storage
                .upsert_profile_memory(user_id, domain, updated)
                .await?;
        }

        let prediction = self
            .storage
            .create_result(PredictionResult::new(query.id.as_str(), result_text.as_str()))
            .await?;

        tracing::info!(query_id = %query.id, prediction_id = %prediction.id, "Prediction stored");

        Ok(PredictOutcome {
            query_id: query.id,
            prediction_id: prediction.id,
            result_text,
            model_version,
            confidence: None,
            profile_memory: updated_profile,
            model_prediction_success,
        })
    }
}
