use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable flat mapping from field name to scalar, supplied per evaluation.
/// Backed by a `BTreeMap` so serialization and iteration are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantData(BTreeMap<String, Value>);

impl ApplicantData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a field up without coercion. Callers must treat `None` (key
    /// absent) as a distinct state, not a falsy default.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns a copy with one extra field set, leaving `self` untouched.
    /// Used by the pipeline to expose the computed score to the decision tree.
    pub fn with_field(&self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut extended = self.clone();
        extended.insert(field, value);
        extended
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for ApplicantData {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self(fields)
    }
}

impl FromIterator<(String, Value)> for ApplicantData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
