//! Turning raw feature strings into model inputs.

use super::error::{MlError, Result};
use serde::{Deserialize, Serialize};

/// One input column of a feature model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSpec {
    pub name: String,

    #[serde(default)]
    pub encoding: Encoding,
}

/// How a raw string value becomes a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Plain number; a leading `$` and a trailing `%` are tolerated
    #[default]
    Numeric,

    /// yes/no style flag mapped to 1.0 / 0.0
    Boolean,

    /// Case-insensitive position in `categories`
    Categorical { categories: Vec<String> },
}

impl FeatureSpec {
    /// Encode a raw value for this column.
    pub fn encode(&self, raw: &str) -> Result<f64> {
        let value = raw.trim();
        if value.is_empty() || value == "?" {
            return Err(MlError::encoding(&self.name, raw, "value is missing"));
        }

        match &self.encoding {
            Encoding::Numeric => {
                let number = value.strip_prefix('$').unwrap_or(value);
                let number = number.strip_suffix('%').unwrap_or(number).trim();
                match number.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(n),
                    _ => Err(MlError::encoding(&self.name, raw, "not a number")),
                }
            }
            Encoding::Boolean => match value.to_lowercase().as_str() {
                "yes" | "true" | "1" | "y" => Ok(1.0),
                "no" | "false" | "0" | "n" => Ok(0.0),
                _ => Err(MlError::encoding(&self.name, raw, "not a yes/no value")),
            },
            Encoding::Categorical { categories } => categories
                .iter()
                .position(|category| category.eq_ignore_ascii_case(value))
                .map(|index| index as f64)
                .ok_or_else(|| {
                    MlError::encoding(
                        &self.name,
                        raw,
                        format!("expected one of {}", categories.join(", ")),
                    )
                }),
        }
    }
}
