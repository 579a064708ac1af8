//! TF-IDF nearest-neighbour classifier over free text.

use super::artifact::Prediction;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(r"(?u)\b\w\w+\b").unwrap();
}

/// Lowercased word tokens of two or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A labelled training document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub text: String,
    pub label: Prediction,
}

/// Serialized form: the neighbour count and the training corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextKnnSpec {
    pub k: usize,
    pub documents: Vec<LabeledDocument>,
}

impl TextKnnSpec {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.k == 0 {
            return Err("k must be at least 1".to_string());
        }
        if self.documents.is_empty() {
            return Err("text model has no documents".to_string());
        }
        Ok(())
    }
}

type SparseVector = HashMap<String, f64>;

/// Fitted model: smoothed IDF weights and L2-normalised document vectors.
#[derive(Debug, Clone)]
pub struct TextKnn {
    k: usize,
    idf: HashMap<String, f64>,
    vectors: Vec<SparseVector>,
    labels: Vec<Prediction>,
}

impl TextKnn {
    pub fn fit(spec: &TextKnnSpec) -> Self {
        let tokenized: Vec<Vec<String>> =
            spec.documents.iter().map(|doc| tokenize(&doc.text)).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let doc_count = tokenized.len() as f64;
        let idf: HashMap<String, f64> = doc_freq
            .into_iter()
            .map(|(token, df)| {
                let weight = ((1.0 + doc_count) / (1.0 + df as f64)).ln() + 1.0;
                (token.to_string(), weight)
            })
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &idf))
            .collect();

        Self {
            k: spec.k,
            idf,
            vectors,
            labels: spec.documents.iter().map(|doc| doc.label.clone()).collect(),
        }
    }

    /// Cosine similarity of `text` against every training document.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let query = weigh(&tokenize(text), &self.idf);
        self.vectors
            .iter()
            .map(|doc| {
                query
                    .iter()
                    .map(|(token, weight)| weight * doc.get(token).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect()
    }

    /// Majority label of the `k` most similar documents; ties go to the
    /// label with the larger summed similarity.
    pub fn predict(&self, text: &str) -> Option<Prediction> {
        let similarities = self.similarities(text);

        let mut ranked: Vec<usize> = (0..similarities.len()).collect();
        ranked.sort_by(|a, b| similarities[*b].total_cmp(&similarities[*a]));

        // (label, votes, summed similarity) in first-seen order
        let mut tally: Vec<(&Prediction, usize, f64)> = Vec::new();
        for index in ranked.into_iter().take(self.k) {
            let label = &self.labels[index];
            match tally.iter_mut().find(|(seen, _, _)| *seen == label) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 += similarities[index];
                }
                None => tally.push((label, 1, similarities[index])),
            }
        }

        let mut best: Option<(&Prediction, usize, f64)> = None;
        for entry in tally {
            let better = match best {
                None => true,
                Some((_, votes, score)) => entry.1 > votes || (entry.1 == votes && entry.2 > score),
            };
            if better {
                best = Some(entry);
            }
        }
        best.map(|(label, _, _)| label.clone())
    }
}

fn weigh(tokens: &[String], idf: &HashMap<String, f64>) -> SparseVector {
    let mut vector = SparseVector::new();
    for token in tokens {
        if let Some(weight) = idf.get(token) {
            *vector.entry(token.clone()).or_insert(0.0) += weight;
        }
    }

    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}
