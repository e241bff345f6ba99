use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::applicant::ApplicantData;
use super::policy::PolicyId;

/// Decisions produced by the default score bands and the eligibility
/// short-circuit. Decision trees may emit arbitrary action strings, so the
/// decision field stays an open string rather than a closed enum.
pub const DECISION_APPROVE: &str = "APPROVE";
pub const DECISION_REVIEW: &str = "REVIEW";
pub const DECISION_REJECT: &str = "REJECT";
pub const NO_DECISION: &str = "NO_DECISION";

pub const TIER_1: &str = "TIER_1";
pub const TIER_2: &str = "TIER_2";

/// Final outcome of one simulation, with the full audit trace concatenated
/// in fixed order: eligibility, scoring, decision tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub decision: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub triggered_rule: String,
    pub reason: String,
    pub trace: Vec<String>,
}

/// A persisted simulation: the input payload alongside the result, for the
/// history listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    pub id: String,
    pub policy_id: PolicyId,
    pub simulation_input: ApplicantData,
    pub result: SimulationResult,
    pub created_at: DateTime<Utc>,
}

/// Per-step completion map returned by policy validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSteps {
    pub attributes: bool,
    pub eligibility: bool,
    pub scoring: bool,
    pub decision_tree: bool,
    pub clauses: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub completed_steps: CompletedSteps,
}

#[cfg(test)]
mod tests {
    use super::SimulationResult;

    #[test]
    fn result_serializes_with_wire_field_names_and_no_null_tier() {
        let result = SimulationResult {
            decision: super::DECISION_REJECT.to_string(),
            score: 0.0,
            tier: None,
            triggered_rule: "Eligibility Filter".to_string(),
            reason: "Failed eligibility criteria".to_string(),
            trace: vec!["age >= 18 ✗".to_string()],
        };

        let encoded = serde_json::to_value(&result).expect("encode result");
        assert_eq!(encoded["triggeredRule"], "Eligibility Filter");
        assert!(encoded.get("tier").is_none());
    }
}
