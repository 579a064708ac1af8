//! The plain-text digest of model results handed to the advice prompt.

use crate::domain::ModelKey;
use crate::ml::Prediction;
use std::collections::BTreeMap;

/// Appended when at least one model could not run.
pub const MISSING_INFO_WARNING: &str = "\n⚠️ Some specialized models could not provide personalized insights due to missing or incomplete information. For best results, try providing more details or answering all the requested questions!";

/// Used when there is nothing else to say.
pub const NO_INSIGHTS: &str =
    "No model-based insights could be generated from the information provided.";

/// One `"Display Name: prediction"` line per successful model, in key order,
/// then the warning line if any model failed.
pub fn build_summary(
    raw_output: &BTreeMap<ModelKey, Option<Prediction>>,
    success: &BTreeMap<ModelKey, bool>,
) -> String {
    let mut lines: Vec<String> = raw_output
        .iter()
        .filter_map(|(key, prediction)| {
            prediction
                .as_ref()
                .map(|p| format!("{}: {}", key.display_name(), p))
        })
        .collect();

    if success.values().any(|ok| !ok) {
        lines.push(MISSING_INFO_WARNING.to_string());
    }

    if lines.is_empty() {
        NO_INSIGHTS.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_lines_in_key_order() {
        let raw = BTreeMap::from([
            (ModelKey::CareerProfession, Some(Prediction::Label("Data Scientist".into()))),
            (ModelKey::CareerAdmission, Some(Prediction::Number(0.82))),
        ]);
        let success = BTreeMap::from([
            (ModelKey::CareerAdmission, true),
            (ModelKey::CareerProfession, true),
        ]);

        assert_eq!(
            build_summary(&raw, &success),
            "Career Admission: 0.82\nCareer Profession: Data Scientist"
        );
    }

    #[test]
    fn test_partial_failure_appends_warning() {
        let raw = BTreeMap::from([
            (ModelKey::HealthMental, Some(Prediction::Label("Low".into()))),
            (ModelKey::HealthHeart, None),
        ]);
        let success = BTreeMap::from([
            (ModelKey::HealthMental, true),
            (ModelKey::HealthHeart, false),
        ]);

        assert_eq!(
            build_summary(&raw, &success),
            format!("Health Mental: Low\n{}", MISSING_INFO_WARNING)
        );
    }

    #[test]
    fn test_all_failed_is_only_the_warning() {
        let raw = BTreeMap::from([(ModelKey::FinanceLoan, None)]);
        let success = BTreeMap::from([(ModelKey::FinanceLoan, false)]);
        assert_eq!(build_summary(&raw, &success), MISSING_INFO_WARNING);
    }

    #[test]
    fn test_nothing_at_all() {
        assert_eq!(build_summary(&BTreeMap::new(), &BTreeMap::new()), NO_INSIGHTS);
    }
}
