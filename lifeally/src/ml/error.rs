//! Error types for model loading and inference

use std::fmt;
use thiserror::Error;

/// Error type for ML operations
#[derive(Debug, Error)]
pub enum MlError {
    /// An artifact is missing from the models directory
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// An artifact could not be parsed or failed shape checks
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// Wrong number of input values for the model
    #[error("Expected {expected} feature values, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// A raw value could not be encoded for its column
    #[error("Cannot encode value {value:?} for feature '{feature}': {reason}")]
    Encoding {
        feature: String,
        value: String,
        reason: String,
    },

    /// Inference failed
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// IO error while reading artifacts
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MlError {
    pub fn model_not_found(msg: impl fmt::Display) -> Self {
        Self::ModelNotFound(msg.to_string())
    }

    pub fn invalid_artifact(msg: impl fmt::Display) -> Self {
        Self::InvalidArtifact(msg.to_string())
    }

    pub fn encoding(feature: &str, value: &str, reason: impl fmt::Display) -> Self {
        Self::Encoding {
            feature: feature.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn prediction(msg: impl fmt::Display) -> Self {
        Self::Prediction(msg.to_string())
    }
}

/// Result type for ML operations
pub type Result<T> = std::result::Result<T, MlError>;
