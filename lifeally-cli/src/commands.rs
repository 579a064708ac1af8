//! Command implementations, kept free of printing so they can be tested

use crate::args::{ModelsArgs, PredictArgs};
use lifeally::LifeallyError;
use lifeally::domain::{Domain, ModelKey};
use lifeally::ml::ModelRegistry;
use lifeally::pipeline::{Pipeline, PipelineOutput, Profile};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// One row of the `models` listing
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub key: ModelKey,
    pub domain: Domain,
    pub name: String,
    /// Input columns; `None` for text models
    pub features: Option<Vec<String>>,
}

pub async fn handle_predict(
    pipeline: &Pipeline,
    args: &PredictArgs,
) -> lifeally::Result<PipelineOutput> {
    let profile = match &args.profile {
        Some(path) => Some(load_profile(path)?),
        None => None,
    };

    Ok(pipeline
        .run(&args.text, &args.domain, profile.as_ref())
        .await)
}

pub fn handle_models(
    registry: &ModelRegistry,
    args: &ModelsArgs,
) -> lifeally::Result<Vec<ModelSummary>> {
    let domain = args
        .domain
        .as_deref()
        .map(|d| d.parse::<Domain>())
        .transpose()
        .map_err(|e| LifeallyError::Validation(e.to_string()))?;

    Ok(ModelKey::ALL
        .into_iter()
        .filter(|key| domain.is_none_or(|d| key.domain() == d))
        .filter(|key| registry.contains(*key))
        .map(|key| ModelSummary {
            key,
            domain: key.domain(),
            name: key.display_name(),
            features: registry.feature_names(key),
        })
        .collect())
}

/// Read a profile from a JSON object. Numbers and booleans are kept as their
/// text form, nulls are dropped.
pub fn load_profile(path: &Path) -> lifeally::Result<Profile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LifeallyError::Other(format!("Cannot read profile {}: {}", path.display(), e))
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| {
        LifeallyError::Validation(format!("Profile {} is not valid JSON: {}", path.display(), e))
    })?;

    let Value::Object(entries) = value else {
        return Err(LifeallyError::Validation(
            "Profile must be a JSON object of feature names to values".to_string(),
        ));
    };

    let mut profile = Profile::new();
    for (name, value) in entries {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(LifeallyError::Validation(format!(
                    "Profile value for '{}' must be a string or number, got {}",
                    name, other
                )));
            }
        };
        profile.insert(name, text);
    }
    Ok(profile)
}
