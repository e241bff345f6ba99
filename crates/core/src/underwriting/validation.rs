use chrono::{DateTime, Utc};

use crate::domain::clause::Clause;
use crate::domain::policy::PolicyRecord;
use crate::domain::rule::ConditionNode;
use crate::domain::scoring::ScoringConfig;
use crate::domain::simulation::{CompletedSteps, PolicyValidationReport};
use crate::domain::tree::DecisionNode;

/// Readiness check across every authoring step of a policy. Collects all
/// problems in one pass rather than failing on the first.
pub fn validate_policy(
    policy: &PolicyRecord,
    rules: Option<&ConditionNode>,
    scoring: Option<&ScoringConfig>,
    decision_tree: Option<&DecisionNode>,
    clauses: &[Clause],
    as_of: DateTime<Utc>,
) -> PolicyValidationReport {
    let mut errors = Vec::new();

    // Only a non-empty rule group counts as authored eligibility criteria;
    // a bare leaf is treated as an unfinished draft.
    let eligibility_done = matches!(rules, Some(ConditionNode::Group(group)) if !group.conditions.is_empty());
    if !eligibility_done {
        errors.push("No eligibility rules defined".to_string());
    }

    let total_weight = scoring.map(ScoringConfig::total_weight);
    let scoring_done = total_weight == Some(100.0);
    match scoring {
        None => errors.push("No scoring parameters defined".to_string()),
        Some(config) if config.categories.is_empty() => {
            errors.push("No scoring parameters defined".to_string());
        }
        Some(config) => {
            let total = config.total_weight();
            if total != 100.0 {
                errors.push(format!("Scoring weight is {total}%, must be 100%"));
            }
        }
    }

    let tree_done = decision_tree.is_some_and(DecisionNode::is_condition);
    if !tree_done {
        errors.push("No decision tree configured".to_string());
    }

    let clauses_done = !clauses.is_empty();
    if !clauses_done {
        errors.push("No clauses defined".to_string());
    }

    if let Some(effective) = policy.effective_date {
        if effective < as_of {
            errors.push("Effective date is in the past".to_string());
        }
        if let Some(expiry) = policy.expiry_date {
            if expiry <= effective {
                errors.push("Expiry date must be after effective date".to_string());
            }
        }
    }

    PolicyValidationReport {
        valid: errors.is_empty(),
        errors,
        completed_steps: CompletedSteps {
            attributes: policy.policy_name.as_deref().is_some_and(|name| !name.is_empty()),
            eligibility: eligibility_done,
            scoring: scoring_done,
            decision_tree: tree_done,
            clauses: clauses_done,
        },
    }
}
