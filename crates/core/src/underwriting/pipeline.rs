use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::applicant::ApplicantData;
use crate::domain::rule::ConditionNode;
use crate::domain::scoring::ScoringConfig;
use crate::domain::simulation::{
    SimulationResult, DECISION_APPROVE, DECISION_REJECT, DECISION_REVIEW, TIER_1, TIER_2,
};
use crate::domain::tree::DecisionNode;
use crate::errors::EvaluationError;

use super::eligibility::EligibilityEngine;
use super::scoring::ScoringEngine;
use super::tree::DecisionTreeEngine;

/// Reserved applicant field carrying the computed score into the decision
/// tree. Underscore-prefixed so it cannot collide with real applicant
/// fields.
pub const SCORE_FIELD: &str = "_score";

/// Immutable bundle of the three configuration documents one simulation
/// runs against. Any document may be absent; the pipeline degrades to
/// default-pass, zero score, and default decision bands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    pub rules: Option<ConditionNode>,
    pub scoring: Option<ScoringConfig>,
    pub decision_tree: Option<DecisionNode>,
}

impl PolicyConfiguration {
    /// Decodes the raw JSON documents the persistence collaborator hands
    /// over. A malformed document aborts with a structural error; an absent
    /// one is simply unconfigured.
    pub fn from_documents(
        rule_json: Option<Value>,
        scoring_json: Option<Value>,
        decision_tree_json: Option<Value>,
    ) -> Result<Self, EvaluationError> {
        Ok(Self {
            rules: decode("eligibility rules", rule_json)?,
            scoring: decode("scoring config", scoring_json)?,
            decision_tree: decode("decision tree", decision_tree_json)?,
        })
    }
}

fn decode<T: DeserializeOwned>(
    document: &str,
    value: Option<Value>,
) -> Result<Option<T>, EvaluationError> {
    value
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|error| EvaluationError::malformed(document, error.to_string()))
        })
        .transpose()
}

/// Sequences the eligibility, scoring, and decision tree engines into one
/// auditable result. Pure and deterministic; all I/O stays with the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulationPipeline {
    eligibility: EligibilityEngine,
    scoring: ScoringEngine,
    tree: DecisionTreeEngine,
}

impl SimulationPipeline {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            eligibility: EligibilityEngine::with_max_depth(max_depth),
            scoring: ScoringEngine,
            tree: DecisionTreeEngine::with_max_depth(max_depth),
        }
    }

    pub fn run(
        &self,
        configuration: &PolicyConfiguration,
        applicant: &ApplicantData,
    ) -> Result<SimulationResult, EvaluationError> {
        let eligibility = self.eligibility.evaluate(configuration.rules.as_ref(), applicant)?;

        if !eligibility.passed {
            // Hard gate: scoring and the tree are skipped entirely.
            return Ok(SimulationResult {
                decision: DECISION_REJECT.to_string(),
                score: 0.0,
                tier: None,
                triggered_rule: "Eligibility Filter".to_string(),
                reason: "Failed eligibility criteria".to_string(),
                trace: eligibility.trace,
            });
        }

        let scored = self.scoring.score(configuration.scoring.as_ref(), applicant);

        let configured_tree =
            configuration.decision_tree.as_ref().filter(|node| node.is_condition());
        let (decision, tier, tree_trace) = match configured_tree {
            Some(root) => {
                let data = applicant.with_field(SCORE_FIELD, scored.score);
                let outcome = self.tree.evaluate(root, &data)?;
                (outcome.decision, outcome.tier, outcome.trace)
            }
            None => {
                let (decision, tier) = default_bands(scored.score);
                (decision.to_string(), tier.map(str::to_string), Vec::new())
            }
        };

        let triggered_rule = triggered_rule(&tree_trace, scored.score);
        let reason = format!("Score {} resulted in {decision}", scored.score);

        let mut trace = eligibility.trace;
        trace.extend(scored.trace);
        trace.extend(tree_trace);

        Ok(SimulationResult {
            decision,
            score: scored.score,
            tier,
            triggered_rule,
            reason,
            trace,
        })
    }
}

/// Score bands applied when no decision tree is configured.
fn default_bands(score: f64) -> (&'static str, Option<&'static str>) {
    if score >= 75.0 {
        (DECISION_APPROVE, Some(TIER_1))
    } else if score >= 60.0 {
        (DECISION_REVIEW, Some(TIER_2))
    } else {
        (DECISION_REJECT, None)
    }
}

/// The last failing tree condition, else the last tree line, else a
/// synthesized score marker.
fn triggered_rule(tree_trace: &[String], score: f64) -> String {
    tree_trace
        .iter()
        .rev()
        .find(|line| line.contains('✗'))
        .or_else(|| tree_trace.last())
        .cloned()
        .unwrap_or_else(|| format!("Score: {score}"))
}
