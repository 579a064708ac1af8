//! Turning a free-text query into model inputs.

use super::PipelineError;
use super::profile::{Profile, is_known_value};
use crate::llm::{LlmClient, LlmError, prompt};
use std::fmt;

/// Where a model's inputs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    /// The query itself, for text models
    Query,
    /// Every value was already known in the profile
    Profile,
    /// The query was a comma-separated list of the right length
    Structured,
    /// The language model pulled the values out of the query
    Extracted,
}

impl fmt::Display for FeatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureSource::Query => "query",
            FeatureSource::Profile => "profile",
            FeatureSource::Structured => "structured",
            FeatureSource::Extracted => "extracted",
        };
        f.write_str(name)
    }
}

/// Model inputs together with their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeatures {
    pub values: Vec<String>,
    pub source: FeatureSource,
}

fn split_trimmed(text: &str) -> Vec<String> {
    text.split(',').map(|item| item.trim().to_string()).collect()
}

/// Whether `query` splits on commas into exactly one item per feature.
///
/// With a single feature any comma-free query qualifies and is used verbatim.
pub fn is_structured_input(query: &str, feature_names: &[String]) -> bool {
    query.split(',').count() == feature_names.len()
}

/// Ask the language model for the values of `feature_names`, in order.
///
/// Returns `Ok(None)` when the reply does not have one value per feature.
pub async fn extract_structured_features(
    llm: &dyn LlmClient,
    query: &str,
    feature_names: &[String],
    profile: Option<&Profile>,
) -> Result<Option<Vec<String>>, LlmError> {
    let prompt = prompt::extraction_prompt(query, feature_names, profile);
    let reply = llm.complete(&prompt).await?;

    let values = split_trimmed(reply.trim());
    if values.len() == feature_names.len() {
        Ok(Some(values))
    } else {
        tracing::debug!(
            expected = feature_names.len(),
            actual = values.len(),
            "Extraction reply has the wrong number of values"
        );
        Ok(None)
    }
}

/// Resolve the inputs for one model.
///
/// Text models (`feature_names` is `None`) get the query. Otherwise the
/// profile is used when it already knows every feature, then a structured
/// query, and finally extraction with the profile as context.
pub async fn get_model_features(
    llm: &dyn LlmClient,
    query: &str,
    feature_names: Option<&[String]>,
    profile: Option<&Profile>,
) -> Result<ResolvedFeatures, PipelineError> {
    let Some(names) = feature_names.filter(|names| !names.is_empty()) else {
        return Ok(ResolvedFeatures {
            values: vec![query.to_string()],
            source: FeatureSource::Query,
        });
    };

    if let Some(values) = profile
        .filter(|p| !p.is_empty())
        .and_then(|p| p.complete_values(names))
    {
        return Ok(ResolvedFeatures {
            values,
            source: FeatureSource::Profile,
        });
    }

    if is_structured_input(query, names) {
        return Ok(ResolvedFeatures {
            values: split_trimmed(query),
            source: FeatureSource::Structured,
        });
    }

    match extract_structured_features(llm, query, names, profile).await? {
        Some(values) => Ok(ResolvedFeatures {
            values,
            source: FeatureSource::Extracted,
        }),
        None => Err(PipelineError::ExtractionMismatch {
            expected: names.len(),
        }),
    }
}

/// Copy every informative value into `profile`, overwriting older ones.
pub fn update_profile_with_features(profile: &mut Profile, feature_names: &[String], values: &[String]) {
    for (name, value) in feature_names.iter().zip(values) {
        if is_known_value(value) {
            profile.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use mockall::predicate::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_is_structured_input() {
        let three = names(&["a", "b", "c"]);
        assert!(is_structured_input("1, 2, 3", &three));
        assert!(is_structured_input(",,", &three));
        assert!(!is_structured_input("1, 2", &three));
        assert!(!is_structured_input("I earn 5000 a month", &three));

        // Single-feature models accept any comma-free query
        assert!(is_structured_input("I feel anxious", &names(&["text"])));
    }

    #[tokio::test]
    async fn test_text_model_gets_query() {
        let llm = MockLlmClient::new();
        let resolved = get_model_features(&llm, "we argue a lot", None, None)
            .await
            .unwrap();
        assert_eq!(resolved.values, vec!["we argue a lot"]);
        assert_eq!(resolved.source, FeatureSource::Query);
    }

    #[tokio::test]
    async fn test_complete_profile_wins() {
        let llm = MockLlmClient::new();
        let profile: Profile = [("age", "30"), ("income", "4000"), ("extra", "x")]
            .into_iter()
            .collect();
        let feature_names = names(&["income", "age"]);

        let resolved = get_model_features(&llm, "1, 2", Some(&feature_names), Some(&profile))
            .await
            .unwrap();
        assert_eq!(resolved.values, vec!["4000", "30"]);
        assert_eq!(resolved.source, FeatureSource::Profile);
    }

    #[tokio::test]
    async fn test_structured_input_when_profile_incomplete() {
        let llm = MockLlmClient::new();
        let profile: Profile = [("age", "?")].into_iter().collect();
        let feature_names = names(&["age", "income"]);

        let resolved = get_model_features(&llm, " 31 ,5200 ", Some(&feature_names), Some(&profile))
            .await
            .unwrap();
        assert_eq!(resolved.values, vec!["31", "5200"]);
        assert_eq!(resolved.source, FeatureSource::Structured);
    }

    #[tokio::test]
    async fn test_extraction_uses_profile_context() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .with(function(|prompt: &str| {
                prompt.contains("Known profile so far:\nage: 30\n")
                    && prompt.contains("age, income")
            }))
            .times(1)
            .returning(|_| Ok(" 30 , ? ".to_string()));

        let profile: Profile = [("age", "30")].into_iter().collect();
        let feature_names = names(&["age", "income"]);

        let resolved = get_model_features(
            &llm,
            "I am thirty and unsure about my pay",
            Some(&feature_names),
            Some(&profile),
        )
        .await
        .unwrap();
        assert_eq!(resolved.values, vec!["30", "?"]);
        assert_eq!(resolved.source, FeatureSource::Extracted);
    }

    #[tokio::test]
    async fn test_extraction_count_mismatch() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .returning(|_| Ok("I could not find anything".to_string()));
        let feature_names = names(&["age", "income"]);

        let direct = extract_structured_features(&llm, "hello there", &feature_names, None)
            .await
            .unwrap();
        assert!(direct.is_none());

        let err = get_model_features(&llm, "hello there", Some(&feature_names), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionMismatch { expected: 2 }));
    }

    #[tokio::test]
    async fn test_extraction_llm_failure_propagates() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .returning(|_| Err(LlmError::Request("connection refused".into())));
        let feature_names = names(&["age", "income"]);

        let err = get_model_features(&llm, "hello there", Some(&feature_names), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Llm(_)));
    }

    #[test]
    fn test_update_profile_skips_unknown_values() {
        let mut profile: Profile = [("age", "30"), ("income", "4000")].into_iter().collect();
        update_profile_with_features(
            &mut profile,
            &names(&["age", "income", "savings"]),
            &names(&["31", "?", ""]),
        );

        assert_eq!(profile.get("age"), Some("31"));
        assert_eq!(profile.get("income"), Some("4000"));
        assert_eq!(profile.get("savings"), None);
    }
}
