use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::applicant::ApplicantData;
use crate::domain::scoring::ScoringConfig;

use super::condition::{compare, Comparator};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub score: f64,
    pub trace: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub total_weight: f64,
    pub parameter_count: usize,
}

/// Sums weighted parameter matches into a composite score. Full traversal:
/// one trace line per parameter, match or not.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn score(&self, config: Option<&ScoringConfig>, data: &ApplicantData) -> ScoreOutcome {
        let mut score = 0.0;
        let mut trace = Vec::new();

        let Some(config) = config else {
            return ScoreOutcome { score, trace };
        };

        for category in &config.categories {
            for parameter in &category.parameters {
                let actual = data.get(&parameter.field);
                let met = Comparator::parse(&parameter.operator)
                    .map(|comparator| compare(actual, comparator, &parameter.threshold))
                    .unwrap_or(false);

                let weight = parameter.weight_or_zero();
                if met {
                    score += weight;
                }

                let mark = if met { '✓' } else { '✗' };
                trace.push(format!(
                    "{} {} {} (weight: {weight}%) {mark}",
                    parameter.field,
                    parameter.operator,
                    display_threshold(&parameter.threshold),
                ));
            }
        }

        ScoreOutcome { score, trace }
    }

    /// Structural validation of a scoring config. Weights must total exactly
    /// 100 for the config to be valid; scoring itself never enforces this.
    pub fn validate(&self, config: Option<&ScoringConfig>) -> ScoringValidation {
        let Some(config) = config else {
            return ScoringValidation {
                valid: false,
                errors: vec!["No scoring parameters defined".to_string()],
                total_weight: 0.0,
                parameter_count: 0,
            };
        };

        let mut errors = Vec::new();
        for category in &config.categories {
            if category.parameters.is_empty() {
                errors.push(format!("Category \"{}\" has no parameters", category.name));
            }
        }

        let total_weight = config.total_weight();
        let parameter_count = config.parameter_count();

        if total_weight != 100.0 {
            errors.push(format!("Total weight is {total_weight}%, must be 100%"));
        }
        if parameter_count == 0 {
            errors.push("At least one parameter required".to_string());
        }

        ScoringValidation { valid: errors.is_empty(), errors, total_weight, parameter_count }
    }
}

/// Thresholds render the way the original audit lines did: bare strings
/// without quotes, everything else as JSON.
fn display_threshold(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            items.iter().map(display_threshold).collect::<Vec<_>>().join(",")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::applicant::ApplicantData;
    use crate::domain::scoring::ScoringConfig;

    use super::ScoringEngine;

    fn applicant(fields: serde_json::Value) -> ApplicantData {
        serde_json::from_value(fields).expect("build applicant")
    }

    fn config(document: serde_json::Value) -> ScoringConfig {
        serde_json::from_value(document).expect("build scoring config")
    }

    #[test]
    fn absent_config_scores_zero_with_empty_trace() {
        let outcome = ScoringEngine.score(None, &applicant(json!({"age": 40})));
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.trace.is_empty());
    }

    #[test]
    fn score_is_the_sum_of_matching_weights_only() {
        let config = config(json!({
            "categories": [
                {"name": "Financial", "parameters": [
                    {"field": "income", "operator": ">=", "threshold": 40000, "weight": 60},
                    {"field": "debt_ratio", "operator": "<", "threshold": 0.4, "weight": 25}
                ]},
                {"name": "History", "parameters": [
                    {"field": "defaults", "operator": "=", "threshold": 0, "weight": 15}
                ]}
            ]
        }));
        let data = applicant(json!({"income": 55000, "debt_ratio": 0.6, "defaults": 0}));

        let outcome = ScoringEngine.score(Some(&config), &data);

        assert_eq!(outcome.score, 75.0);
        // Non-matching parameters still contribute exactly one trace line.
        assert_eq!(
            outcome.trace,
            vec![
                "income >= 40000 (weight: 60%) ✓",
                "debt_ratio < 0.4 (weight: 25%) ✗",
                "defaults = 0 (weight: 15%) ✓",
            ]
        );
    }

    #[test]
    fn missing_weight_adds_nothing_but_still_traces() {
        let config = config(json!({
            "categories": [
                {"name": "Sparse", "parameters": [
                    {"field": "age", "operator": ">=", "threshold": 18}
                ]}
            ]
        }));

        let outcome = ScoringEngine.score(Some(&config), &applicant(json!({"age": 30})));
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.trace, vec!["age >= 18 (weight: 0%) ✓"]);
    }

    #[test]
    fn validate_flags_missing_config() {
        let validation = ScoringEngine.validate(None);
        assert!(!validation.valid);
        assert_eq!(validation.errors, vec!["No scoring parameters defined"]);
        assert_eq!(validation.parameter_count, 0);
    }

    #[test]
    fn validate_flags_empty_categories_and_bad_totals() {
        let config = config(json!({
            "categories": [
                {"name": "Empty", "parameters": []},
                {"name": "Partial", "parameters": [
                    {"field": "income", "operator": ">=", "threshold": 40000, "weight": 60}
                ]}
            ]
        }));

        let validation = ScoringEngine.validate(Some(&config));
        assert!(!validation.valid);
        assert_eq!(validation.total_weight, 60.0);
        assert_eq!(validation.parameter_count, 1);
        assert!(validation.errors.contains(&"Category \"Empty\" has no parameters".to_string()));
        assert!(validation.errors.contains(&"Total weight is 60%, must be 100%".to_string()));
    }

    #[test]
    fn validate_accepts_a_complete_config() {
        let config = config(json!({
            "categories": [
                {"name": "All", "parameters": [
                    {"field": "a", "operator": ">", "threshold": 1, "weight": 50},
                    {"field": "b", "operator": ">", "threshold": 1, "weight": 50}
                ]}
            ]
        }));

        let validation = ScoringEngine.validate(Some(&config));
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.total_weight, 100.0);
        assert_eq!(validation.parameter_count, 2);
    }
}
