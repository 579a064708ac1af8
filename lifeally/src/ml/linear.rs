//! Linear estimators.

use super::artifact::Prediction;
use serde::{Deserialize, Serialize};

fn dot(weights: &[f64], x: &[f64]) -> f64 {
    weights.iter().zip(x).map(|(w, v)| w * v).sum()
}

/// `y = w·x + b`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub(crate) fn validate(&self, width: usize) -> Result<(), String> {
        if self.coefficients.len() != width {
            return Err(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                width
            ));
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> Prediction {
        Prediction::Number(dot(&self.coefficients, x) + self.intercept)
    }
}

/// Multi-class linear model; one coefficient row per class.
///
/// A single row with two classes is a binary logistic model: the second class
/// wins when the sigmoid of the score reaches 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<Prediction>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearClassifier {
    fn is_binary(&self) -> bool {
        self.coefficients.len() == 1 && self.classes.len() == 2
    }

    pub(crate) fn validate(&self, width: usize) -> Result<(), String> {
        if self.classes.len() < 2 {
            return Err("a classifier needs at least two classes".to_string());
        }
        if !self.is_binary() && self.coefficients.len() != self.classes.len() {
            return Err(format!(
                "{} coefficient rows for {} classes",
                self.coefficients.len(),
                self.classes.len()
            ));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            ));
        }
        if let Some(row) = self.coefficients.iter().find(|row| row.len() != width) {
            return Err(format!("{} coefficients for {} features", row.len(), width));
        }
        Ok(())
    }

    /// Probability of the positive class for binary models.
    pub fn positive_probability(&self, x: &[f64]) -> Option<f64> {
        if !self.is_binary() {
            return None;
        }
        let score = dot(&self.coefficients[0], x) + self.intercepts[0];
        Some(1.0 / (1.0 + (-score).exp()))
    }

    pub fn predict(&self, x: &[f64]) -> Prediction {
        if let Some(probability) = self.positive_probability(x) {
            let index = usize::from(probability >= 0.5);
            return self.classes[index].clone();
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, (row, intercept)) in self.coefficients.iter().zip(&self.intercepts).enumerate()
        {
            let score = dot(row, x) + intercept;
            if score > best_score {
                best = index;
                best_score = score;
            }
        }
        self.classes[best].clone()
    }
}
