use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last-known value per feature name for one user and domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(BTreeMap<String, String>);

/// Placeholder the extraction prompt asks for when a value is unknown.
pub const UNKNOWN_VALUE: &str = "?";

/// Whether a raw value carries information.
pub fn is_known_value(value: &str) -> bool {
    !value.is_empty() && value != UNKNOWN_VALUE
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Values for `names` in order, if every one of them is known.
    pub fn complete_values(&self, names: &[String]) -> Option<Vec<String>> {
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .filter(|value| is_known_value(value))
                    .map(str::to_string)
            })
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Profile {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self(values)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Profile {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
