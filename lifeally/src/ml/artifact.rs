//! On-disk model artifact format.
//!
//! One JSON document per model:
//!
//! ```json
//! {
//!   "name": "career_admission",
//!   "version": "1",
//!   "features": [{"name": "gre_score"}, {"name": "research", "encoding": "boolean"}],
//!   "estimator": {"type": "linear_regressor", "coefficients": [0.002, 0.02], "intercept": -0.1}
//! }
//! ```
//!
//! Text models leave out `features`; their single input is the raw query.

use super::encoding::FeatureSpec;
use super::error::{MlError, Result};
use super::linear::{LinearClassifier, LinearRegressor};
use super::text_knn::TextKnnSpec;
use super::tree::DecisionTree;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of a single model: a number or a class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Number(f64),
    Label(String),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Number(n) => write!(f, "{}", n),
            Prediction::Label(label) => f.write_str(label),
        }
    }
}

/// A serialized model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureSpec>>,

    pub estimator: EstimatorSpec,
}

/// The estimator kinds an artifact may carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSpec {
    LinearRegressor(LinearRegressor),
    LinearClassifier(LinearClassifier),
    DecisionTree(DecisionTree),
    TextKnn(TextKnnSpec),
}

impl EstimatorSpec {
    fn kind(&self) -> &'static str {
        match self {
            EstimatorSpec::LinearRegressor(_) => "linear_regressor",
            EstimatorSpec::LinearClassifier(_) => "linear_classifier",
            EstimatorSpec::DecisionTree(_) => "decision_tree",
            EstimatorSpec::TextKnn(_) => "text_knn",
        }
    }
}

impl ModelArtifact {
    /// Parse an artifact from JSON and run shape checks.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(MlError::invalid_artifact)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check that the estimator fits the declared inputs.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| MlError::invalid_artifact(format!("{}: {}", self.name, msg));

        match (&self.features, &self.estimator) {
            (Some(_), EstimatorSpec::TextKnn(_)) => {
                return Err(invalid("text models must not declare features".to_string()));
            }
            (None, EstimatorSpec::TextKnn(spec)) => {
                spec.validate().map_err(invalid)?;
                return Ok(());
            }
            (None, estimator) => {
                return Err(invalid(format!(
                    "{} requires a feature list",
                    estimator.kind()
                )));
            }
            (Some(features), _) if features.is_empty() => {
                return Err(invalid("feature list is empty".to_string()));
            }
            _ => {}
        }

        let width = self.features.as_ref().map(Vec::len).unwrap_or_default();
        match &self.estimator {
            EstimatorSpec::LinearRegressor(model) => model.validate(width),
            EstimatorSpec::LinearClassifier(model) => model.validate(width),
            EstimatorSpec::DecisionTree(model) => model.validate(width),
            EstimatorSpec::TextKnn(_) => Ok(()),
        }
        .map_err(invalid)
    }
}
