use std::path::Path;

use chrono::Utc;

use polysim_core::domain::clause::Clause;
use polysim_core::domain::policy::PolicyRecord;
use polysim_core::domain::rule::ConditionNode;
use polysim_core::domain::scoring::ScoringConfig;
use polysim_core::domain::tree::DecisionNode;
use polysim_core::underwriting::validate_policy;

use crate::commands::{read_json, read_optional_json, CommandResult};

/// Policy readiness check over file-supplied documents. Exit code 1 when
/// any authoring step is incomplete.
pub fn run(
    policy_path: &Path,
    rules_path: Option<&Path>,
    scoring_path: Option<&Path>,
    tree_path: Option<&Path>,
    clauses_path: Option<&Path>,
) -> CommandResult {
    let policy: PolicyRecord = match read_json("validate", policy_path) {
        Ok(policy) => policy,
        Err(failure) => return failure,
    };
    let rules: Option<ConditionNode> = match read_optional_json("validate", rules_path) {
        Ok(rules) => rules,
        Err(failure) => return failure,
    };
    let scoring: Option<ScoringConfig> = match read_optional_json("validate", scoring_path) {
        Ok(scoring) => scoring,
        Err(failure) => return failure,
    };
    let tree: Option<DecisionNode> = match read_optional_json("validate", tree_path) {
        Ok(tree) => tree,
        Err(failure) => return failure,
    };
    let clauses: Vec<Clause> = match read_optional_json("validate", clauses_path) {
        Ok(clauses) => clauses.unwrap_or_default(),
        Err(failure) => return failure,
    };

    let report = validate_policy(
        &policy,
        rules.as_ref(),
        scoring.as_ref(),
        tree.as_ref(),
        &clauses,
        Utc::now(),
    );

    let exit_code = if report.valid { 0 } else { 1 };
    let mut result = CommandResult::success(&report);
    result.exit_code = exit_code;
    result
}
