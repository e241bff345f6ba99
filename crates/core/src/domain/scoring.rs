use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weighted scoring configuration: ordered categories of ordered parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub categories: Vec<ScoringCategory>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringCategory {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ScoringParameter>,
}

/// One weighted comparison. `weight` is optional on the wire and treated as
/// zero when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringParameter {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub threshold: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl ScoringParameter {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        threshold: impl Into<Value>,
        weight: f64,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            threshold: threshold.into(),
            weight: Some(weight),
        }
    }

    pub fn weight_or_zero(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

impl ScoringConfig {
    /// Sum of every parameter weight across all categories. A "valid" config
    /// totals exactly 100, but scoring proceeds regardless.
    pub fn total_weight(&self) -> f64 {
        self.categories
            .iter()
            .flat_map(|category| &category.parameters)
            .map(ScoringParameter::weight_or_zero)
            .sum()
    }

    pub fn parameter_count(&self) -> usize {
        self.categories.iter().map(|category| category.parameters.len()).sum()
    }
}
