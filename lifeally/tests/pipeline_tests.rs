//! End-to-end pipeline runs against real model artifacts and a scripted
//! language model.

use async_trait::async_trait;
use lifeally::domain::{Domain, ModelKey};
use lifeally::llm::{LlmClient, LlmError};
use lifeally::ml::{Model, ModelArtifact, ModelRegistry, Prediction};
use lifeally::pipeline::summary::MISSING_INFO_WARNING;
use lifeally::pipeline::{LLM_FAILURE_ADVICE, Pipeline, Profile};
use std::sync::{Arc, Mutex};

const EXTRACTION_PREFIX: &str = "You are an expert AI assistant.";

/// Replies to extraction prompts by feature-name marker and to everything
/// else with the configured advice.
#[derive(Debug, Default)]
struct ScriptedLlm {
    extractions: Vec<(&'static str, &'static str)>,
    advice: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn extraction_prompts(&self) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.starts_with(EXTRACTION_PREFIX))
            .collect()
    }

    fn advice_prompt(&self) -> Option<String> {
        self.prompts()
            .into_iter()
            .find(|p| !p.starts_with(EXTRACTION_PREFIX))
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = if prompt.starts_with(EXTRACTION_PREFIX) {
            self.extractions
                .iter()
                .find(|(marker, _)| prompt.contains(marker))
                .map(|(_, reply)| *reply)
        } else {
            self.advice
        };
        reply
            .map(str::to_string)
            .ok_or_else(|| LlmError::Request("scripted failure".to_string()))
    }

    fn model_name(&self) -> String {
        "gemini-scripted".to_string()
    }
}

fn model(json: &str) -> Arc<Model> {
    let artifact = ModelArtifact::from_json(json).expect("artifact should parse");
    Arc::new(Model::from_artifact(artifact).expect("artifact should validate"))
}

fn career_registry() -> ModelRegistry {
    ModelRegistry::new()
        .with_model(
            ModelKey::CareerAdmission,
            model(
                r#"{
                    "name": "career_admission",
                    "features": [
                        {"name": "gre_score"},
                        {"name": "cgpa"},
                        {"name": "research", "encoding": "boolean"}
                    ],
                    "estimator": {"type": "linear_regressor", "coefficients": [0.002, 0.05, 0.03], "intercept": -0.5}
                }"#,
            ),
        )
        .with_model(
            ModelKey::CareerGrowth,
            model(
                r#"{
                    "name": "career_growth",
                    "features": [
                        {"name": "years_experience"},
                        {"name": "training_hours"},
                        {"name": "performance_rating"}
                    ],
                    "estimator": {
                        "type": "linear_classifier",
                        "classes": ["stagnant", "growing"],
                        "coefficients": [[0.3, 0.01, 0.5]],
                        "intercepts": [-3.0]
                    }
                }"#,
            ),
        )
        .with_model(
            ModelKey::CareerProfession,
            model(
                r#"{
                    "name": "career_profession",
                    "estimator": {"type": "text_knn", "k": 1, "documents": [
                        {"text": "I love statistics and machine learning", "label": "Data Scientist"},
                        {"text": "I enjoy drawing buildings and bridges", "label": "Architect"}
                    ]}
                }"#,
            ),
        )
}

fn pipeline(registry: ModelRegistry, llm: Arc<ScriptedLlm>) -> Pipeline {
    Pipeline::new(Arc::new(registry), llm)
}

#[tokio::test]
async fn test_structured_query_with_isolated_failure() {
    let llm = Arc::new(ScriptedLlm {
        advice: Some("Apply broadly! 🎓"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm.clone());

    let output = pipeline.run("320, 9.1, yes", "career", None).await;

    assert_eq!(output.result_text, "Apply broadly! 🎓");
    assert_eq!(output.model_version, "gemini-scripted");

    // "yes" is not numeric, so growth fails while the others carry on
    assert!(matches!(
        output.raw_output[&ModelKey::CareerAdmission],
        Some(Prediction::Number(_))
    ));
    assert_eq!(output.raw_output[&ModelKey::CareerGrowth], None);
    assert!(output.raw_output[&ModelKey::CareerProfession].is_some());
    assert_eq!(output.failed_models(), vec![ModelKey::CareerGrowth]);

    let profile = output.updated_profile.expect("profile is returned for valid domains");
    assert_eq!(profile.get("gre_score"), Some("320"));
    assert_eq!(profile.get("cgpa"), Some("9.1"));
    assert_eq!(profile.get("research"), Some("yes"));
    assert_eq!(profile.get("years_experience"), None);

    // Structured input needs no extraction
    assert!(llm.extraction_prompts().is_empty());

    let advice_prompt = llm.advice_prompt().expect("advice was requested");
    assert!(advice_prompt.contains("Domain: career\n"));
    assert!(advice_prompt.contains("Career Admission: "));
    assert!(advice_prompt.contains(MISSING_INFO_WARNING.trim()));
    assert!(!advice_prompt.contains("Career Growth:"));
}

#[tokio::test]
async fn test_free_text_query_uses_extraction() {
    let llm = Arc::new(ScriptedLlm {
        extractions: vec![
            ("gre_score", "325, 8.7, yes"),
            ("years_experience", "3, 40, ?"),
        ],
        advice: Some("Keep going"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm.clone());

    let output = pipeline
        .run(
            "I scored 325 on the GRE and I love statistics and machine learning",
            "career",
            None,
        )
        .await;

    assert_eq!(llm.extraction_prompts().len(), 2);
    assert_eq!(
        output.raw_output[&ModelKey::CareerProfession],
        Some(Prediction::Label("Data Scientist".to_string()))
    );
    // "?" cannot be encoded
    assert!(!output.model_prediction_success[&ModelKey::CareerGrowth]);
    assert!(output.model_prediction_success[&ModelKey::CareerAdmission]);

    let profile = output.updated_profile.unwrap();
    assert_eq!(profile.get("gre_score"), Some("325"));
    assert_eq!(profile.get("performance_rating"), None);
}

#[tokio::test]
async fn test_complete_profile_skips_extraction() {
    let llm = Arc::new(ScriptedLlm {
        extractions: vec![("years_experience", "5, 20, 4")],
        advice: Some("Nice"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm.clone());
    let profile: Profile = [("gre_score", "310"), ("cgpa", "8.2"), ("research", "no")]
        .into_iter()
        .collect();

    let output = pipeline
        .run("What about my chances this year?", "career", Some(&profile))
        .await;

    let extraction_prompts = llm.extraction_prompts();
    assert_eq!(extraction_prompts.len(), 1);
    assert!(extraction_prompts[0].contains("years_experience, training_hours, performance_rating"));
    assert!(extraction_prompts[0].contains("Known profile so far:\ncgpa: 8.2\ngre_score: 310\nresearch: no\n"));

    assert_eq!(
        output.raw_output[&ModelKey::CareerGrowth],
        Some(Prediction::Label("growing".to_string()))
    );

    let updated = output.updated_profile.unwrap();
    assert_eq!(updated.get("gre_score"), Some("310"));
    assert_eq!(updated.get("years_experience"), Some("5"));
    assert_eq!(updated.len(), 6);
}

#[tokio::test]
async fn test_models_see_only_the_incoming_profile() {
    let llm = Arc::new(ScriptedLlm {
        extractions: vec![
            ("gre_score", "320, 9.1, yes"),
            ("years_experience", "5, 40, 4"),
        ],
        advice: Some("Onwards"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm.clone());
    let profile: Profile = [("years_experience", "5")].into_iter().collect();

    let output = pipeline
        .run(
            "I scored 320 with a cgpa of 9.1 after doing research",
            "career",
            Some(&profile),
        )
        .await;

    let extraction_prompts = llm.extraction_prompts();
    assert_eq!(extraction_prompts.len(), 2);
    let growth_prompt = extraction_prompts
        .iter()
        .find(|p| p.contains("years_experience, training_hours, performance_rating"))
        .unwrap();
    // admission ran first, but its extracted values are not fed to growth
    assert!(growth_prompt.contains("Known profile so far:\nyears_experience: 5\nExtract"));
    assert!(!growth_prompt.contains("gre_score"));

    assert!(output.model_prediction_success[&ModelKey::CareerAdmission]);
    assert!(output.model_prediction_success[&ModelKey::CareerGrowth]);

    let updated = output.updated_profile.unwrap();
    assert_eq!(updated.get("gre_score"), Some("320"));
    assert_eq!(updated.get("training_hours"), Some("40"));
    assert_eq!(updated.get("years_experience"), Some("5"));
    assert_eq!(updated.len(), 6);
}

#[tokio::test]
async fn test_advice_failure_falls_back() {
    let llm = Arc::new(ScriptedLlm::default());
    let pipeline = pipeline(career_registry(), llm.clone());

    let output = pipeline.run("320, 9.1, yes", "career", None).await;

    assert_eq!(output.result_text, LLM_FAILURE_ADVICE);
    assert_eq!(output.model_version, "gemini-scripted");
    assert!(output.model_prediction_success[&ModelKey::CareerAdmission]);
}

#[tokio::test]
async fn test_invalid_domain_runs_nothing() {
    let llm = Arc::new(ScriptedLlm {
        advice: Some("unused"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm.clone());

    let output = pipeline.run("hello", "Career", None).await;

    assert_eq!(output.result_text, "Invalid domain: Career");
    assert!(output.raw_output.is_empty());
    assert!(output.model_prediction_success.is_empty());
    assert!(output.updated_profile.is_none());
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn test_missing_models_still_produce_advice() {
    let llm = Arc::new(ScriptedLlm {
        advice: Some("Tell me more"),
        ..Default::default()
    });
    let pipeline = pipeline(ModelRegistry::new(), llm.clone());

    let output = pipeline
        .run_domain("we keep arguing", Domain::Relationship, None)
        .await;

    assert_eq!(output.result_text, "Tell me more");
    assert_eq!(output.raw_output.len(), 3);
    assert!(output.raw_output.values().all(Option::is_none));
    assert_eq!(output.failed_models().len(), 3);
    assert_eq!(output.updated_profile, Some(Profile::new()));

    let advice_prompt = llm.advice_prompt().unwrap();
    assert!(advice_prompt.contains(MISSING_INFO_WARNING.trim()));
}

#[tokio::test]
async fn test_output_serializes_model_keys() {
    let llm = Arc::new(ScriptedLlm {
        advice: Some("ok"),
        ..Default::default()
    });
    let pipeline = pipeline(career_registry(), llm);

    let output = pipeline.run("320, 9.1, yes", "career", None).await;
    let json = serde_json::to_value(&output).unwrap();

    assert!(json["raw_output"]["career_admission"].is_number());
    assert!(json["raw_output"]["career_growth"].is_null());
    assert!(json["raw_output"]["career_profession"].is_string());
    assert_eq!(json["updated_profile"]["research"], "yes");
}
