//! Pre-trained predictive models.
//!
//! Every model is a JSON artifact (see [`artifact`]) loaded once at startup
//! into a [`ModelRegistry`]. Feature models take an ordered list of raw
//! string values, text models take the query itself.

pub mod artifact;
pub mod encoding;
pub mod error;
pub mod linear;
pub mod registry;
pub mod text_knn;
pub mod tree;

pub use artifact::{EstimatorSpec, ModelArtifact, Prediction};
pub use encoding::{Encoding, FeatureSpec};
pub use error::{MlError, Result};
pub use registry::ModelRegistry;

use text_knn::TextKnn;

/// Anything that can turn raw input values into a prediction.
pub trait Predictor: Send + Sync + std::fmt::Debug {
    /// Ordered input columns, or `None` for a text model.
    fn feature_names(&self) -> Option<&[String]>;

    /// Predict from raw values: one per feature, or just the query for text models.
    fn predict(&self, inputs: &[String]) -> Result<Prediction>;
}

#[derive(Debug)]
enum Estimator {
    LinearRegressor(linear::LinearRegressor),
    LinearClassifier(linear::LinearClassifier),
    DecisionTree(tree::DecisionTree),
    TextKnn(TextKnn),
}

/// A validated, ready-to-run model built from an artifact.
#[derive(Debug)]
pub struct Model {
    name: String,
    version: Option<String>,
    features: Option<Vec<FeatureSpec>>,
    feature_names: Option<Vec<String>>,
    estimator: Estimator,
}

impl Model {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;

        let estimator = match artifact.estimator {
            EstimatorSpec::LinearRegressor(model) => Estimator::LinearRegressor(model),
            EstimatorSpec::LinearClassifier(model) => Estimator::LinearClassifier(model),
            EstimatorSpec::DecisionTree(model) => Estimator::DecisionTree(model),
            EstimatorSpec::TextKnn(spec) => Estimator::TextKnn(TextKnn::fit(&spec)),
        };
        let feature_names = artifact
            .features
            .as_ref()
            .map(|features| features.iter().map(|f| f.name.clone()).collect());

        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            features: artifact.features,
            feature_names,
            estimator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn encode(&self, features: &[FeatureSpec], inputs: &[String]) -> Result<Vec<f64>> {
        if inputs.len() != features.len() {
            return Err(MlError::FeatureCount {
                expected: features.len(),
                actual: inputs.len(),
            });
        }
        features
            .iter()
            .zip(inputs)
            .map(|(spec, raw)| spec.encode(raw))
            .collect()
    }
}

impl Predictor for Model {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, inputs: &[String]) -> Result<Prediction> {
        let Some(features) = &self.features else {
            let Estimator::TextKnn(knn) = &self.estimator else {
                return Err(MlError::prediction(format!(
                    "{} has no feature list",
                    self.name
                )));
            };
            let [text] = inputs else {
                return Err(MlError::FeatureCount {
                    expected: 1,
                    actual: inputs.len(),
                });
            };
            return knn
                .predict(text)
                .ok_or_else(|| MlError::prediction(format!("{} produced no neighbours", self.name)));
        };

        let x = self.encode(features, inputs)?;
        match &self.estimator {
            Estimator::LinearRegressor(model) => Ok(model.predict(&x)),
            Estimator::LinearClassifier(model) => Ok(model.predict(&x)),
            Estimator::DecisionTree(model) => model
                .predict(&x)
                .ok_or_else(|| MlError::prediction(format!("{} tree walk failed", self.name))),
            Estimator::TextKnn(_) => Err(MlError::prediction(format!(
                "{} is a text model but declares features",
                self.name
            ))),
        }
    }
}
