//! Life domains and the fixed set of pre-trained models behind each one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A life domain a query can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Career,
    Finance,
    Health,
    Relationship,
}

impl Domain {
    /// Every domain, in routing order.
    pub const ALL: [Domain; 4] = [
        Domain::Career,
        Domain::Finance,
        Domain::Health,
        Domain::Relationship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Career => "career",
            Domain::Finance => "finance",
            Domain::Health => "health",
            Domain::Relationship => "relationship",
        }
    }

    /// The models run for this domain. Pipeline output keeps this order.
    pub fn model_keys(&self) -> &'static [ModelKey] {
        match self {
            Domain::Career => &[
                ModelKey::CareerAdmission,
                ModelKey::CareerGrowth,
                ModelKey::CareerProfession,
            ],
            Domain::Finance => &[
                ModelKey::FinanceDisposableIncome,
                ModelKey::FinanceLoan,
                ModelKey::FinancePersonalTracker,
            ],
            Domain::Health => &[ModelKey::HealthMental, ModelKey::HealthHeart],
            Domain::Relationship => &[
                ModelKey::RelationshipEmotion,
                ModelKey::Relationship,
                ModelKey::RelationshipKnn,
            ],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid domain: {0}")]
pub struct InvalidDomain(pub String);

impl FromStr for Domain {
    type Err = InvalidDomain;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| InvalidDomain(s.to_string()))
    }
}

/// Identifier of one pre-trained model.
///
/// Ordering follows declaration order, which groups keys by domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKey {
    CareerAdmission,
    CareerGrowth,
    CareerProfession,
    FinanceDisposableIncome,
    FinanceLoan,
    FinancePersonalTracker,
    HealthMental,
    HealthHeart,
    RelationshipEmotion,
    Relationship,
    RelationshipKnn,
}

impl ModelKey {
    pub const ALL: [ModelKey; 11] = [
        ModelKey::CareerAdmission,
        ModelKey::CareerGrowth,
        ModelKey::CareerProfession,
        ModelKey::FinanceDisposableIncome,
        ModelKey::FinanceLoan,
        ModelKey::FinancePersonalTracker,
        ModelKey::HealthMental,
        ModelKey::HealthHeart,
        ModelKey::RelationshipEmotion,
        ModelKey::Relationship,
        ModelKey::RelationshipKnn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKey::CareerAdmission => "career_admission",
            ModelKey::CareerGrowth => "career_growth",
            ModelKey::CareerProfession => "career_profession",
            ModelKey::FinanceDisposableIncome => "finance_disposable_income",
            ModelKey::FinanceLoan => "finance_loan",
            ModelKey::FinancePersonalTracker => "finance_personal_tracker",
            ModelKey::HealthMental => "health_mental",
            ModelKey::HealthHeart => "health_heart",
            ModelKey::RelationshipEmotion => "relationship_emotion",
            ModelKey::Relationship => "relationship",
            ModelKey::RelationshipKnn => "relationship_knn",
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            ModelKey::CareerAdmission | ModelKey::CareerGrowth | ModelKey::CareerProfession => {
                Domain::Career
            }
            ModelKey::FinanceDisposableIncome
            | ModelKey::FinanceLoan
            | ModelKey::FinancePersonalTracker => Domain::Finance,
            ModelKey::HealthMental | ModelKey::HealthHeart => Domain::Health,
            ModelKey::RelationshipEmotion | ModelKey::Relationship | ModelKey::RelationshipKnn => {
                Domain::Relationship
            }
        }
    }

    /// Artifact file name inside the models directory.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ModelKey::CareerAdmission => "career_admission_model.json",
            ModelKey::CareerGrowth => "career_growth_model.json",
            ModelKey::CareerProfession => "career_profession_model.json",
            ModelKey::FinanceDisposableIncome => "finance_disposable_income_model.json",
            ModelKey::FinanceLoan => "finance_loan_model.json",
            ModelKey::FinancePersonalTracker => "finance_personal_tracker_model.json",
            ModelKey::HealthMental => "mental_health_model.json",
            ModelKey::HealthHeart => "heart_health_model.json",
            ModelKey::RelationshipEmotion => "relationship_emotion_model.json",
            ModelKey::Relationship => "relationship_model.json",
            ModelKey::RelationshipKnn => "relationship_tfidf_knn.json",
        }
    }

    /// Human-readable name: underscores become spaces, words are title-cased.
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parsing_is_exact() {
        assert_eq!("career".parse::<Domain>().unwrap(), Domain::Career);
        assert_eq!(
            "relationship".parse::<Domain>().unwrap(),
            Domain::Relationship
        );
        assert!("Career".parse::<Domain>().is_err());
        assert!(" health".parse::<Domain>().is_err());

        let err = "astrology".parse::<Domain>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid domain: astrology");
    }

    #[test]
    fn test_every_key_belongs_to_its_domain() {
        let mut seen = Vec::new();
        for domain in Domain::ALL {
            for key in domain.model_keys() {
                assert_eq!(key.domain(), domain);
                seen.push(*key);
            }
        }
        assert_eq!(seen, ModelKey::ALL.to_vec());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ModelKey::CareerAdmission.display_name(), "Career Admission");
        assert_eq!(
            ModelKey::FinanceDisposableIncome.display_name(),
            "Finance Disposable Income"
        );
        assert_eq!(ModelKey::Relationship.display_name(), "Relationship");
        assert_eq!(ModelKey::RelationshipKnn.display_name(), "Relationship Knn");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ModelKey::HealthMental).unwrap(),
            "\"health_mental\""
        );
        assert_eq!(serde_json::to_string(&Domain::Finance).unwrap(), "\"finance\"");
        for key in ModelKey::ALL {
            assert_eq!(
                serde_json::to_string(&key).unwrap(),
                format!("\"{}\"", key.as_str())
            );
        }
    }
}
