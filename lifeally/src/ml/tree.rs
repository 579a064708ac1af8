//! Decision tree estimator.

use super::artifact::Prediction;
use serde::{Deserialize, Serialize};

/// A node of a flattened tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: Prediction },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point forward, so every walk ends at a leaf.
    pub(crate) fn validate(&self, width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= width {
                    return Err(format!(
                        "node {} splits on feature {} of {}",
                        index, feature, width
                    ));
                }
                for child in [left, right] {
                    if *child <= index || *child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", index, child));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> Option<Prediction> {
        let mut index = 0;
        loop {
            match self.nodes.get(index)? {
                TreeNode::Leaf { value } => return Some(value.clone()),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = *x.get(*feature)?;
                    let next = if value <= *threshold { *left } else { *right };
                    if next <= index {
                        return None;
                    }
                    index = next;
                }
            }
        }
    }
}
