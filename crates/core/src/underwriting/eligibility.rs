use serde::{Deserialize, Serialize};

use crate::domain::applicant::ApplicantData;
use crate::domain::rule::{ConditionNode, GroupOperator};
use crate::errors::EvaluationError;

use super::condition::evaluate_leaf;
use super::MAX_EVAL_DEPTH;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub passed: bool,
    pub trace: Vec<String>,
}

/// Evaluates a recursive rule tree to a boolean gate. Rule trees are
/// user-authored and untrusted, so recursion is depth-bounded.
#[derive(Clone, Copy, Debug)]
pub struct EligibilityEngine {
    max_depth: usize,
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self { max_depth: MAX_EVAL_DEPTH }
    }
}

impl EligibilityEngine {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// An absent rule root is a default-allow: every applicant passes with
    /// an empty trace.
    pub fn evaluate(
        &self,
        root: Option<&ConditionNode>,
        data: &ApplicantData,
    ) -> Result<EligibilityOutcome, EvaluationError> {
        let Some(root) = root else {
            return Ok(EligibilityOutcome { passed: true, trace: Vec::new() });
        };

        let mut trace = Vec::new();
        let passed = self.evaluate_node(root, data, &mut trace, 0)?;
        Ok(EligibilityOutcome { passed, trace })
    }

    fn evaluate_node(
        &self,
        node: &ConditionNode,
        data: &ApplicantData,
        trace: &mut Vec<String>,
        depth: usize,
    ) -> Result<bool, EvaluationError> {
        if depth >= self.max_depth {
            return Err(EvaluationError::DepthExceeded { max_depth: self.max_depth });
        }

        match node {
            ConditionNode::Group(group) => {
                if group.conditions.is_empty() {
                    return Ok(true);
                }

                // Every child is evaluated so the trace records each
                // condition checked, not just the deciding one.
                let mut results = Vec::with_capacity(group.conditions.len());
                for child in &group.conditions {
                    results.push(self.evaluate_node(child, data, trace, depth + 1)?);
                }

                Ok(match group.operator {
                    GroupOperator::And => results.iter().all(|met| *met),
                    GroupOperator::Or => results.iter().any(|met| *met),
                })
            }
            ConditionNode::Leaf(leaf) => {
                let outcome = evaluate_leaf(leaf, data);
                trace.push(outcome.line);
                Ok(outcome.met)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::applicant::ApplicantData;
    use crate::domain::rule::{ConditionNode, GroupOperator};
    use crate::errors::EvaluationError;

    use super::EligibilityEngine;

    fn applicant(fields: serde_json::Value) -> ApplicantData {
        serde_json::from_value(fields).expect("build applicant")
    }

    #[test]
    fn absent_rule_root_is_default_allow() {
        let outcome = EligibilityEngine::default()
            .evaluate(None, &applicant(json!({"age": 5})))
            .expect("evaluate");
        assert!(outcome.passed);
        assert!(outcome.trace.is_empty());
    }

    #[test]
    fn empty_group_passes_under_both_operators() {
        for operator in [GroupOperator::And, GroupOperator::Or] {
            let root = ConditionNode::group(operator, Vec::new());
            let outcome = EligibilityEngine::default()
                .evaluate(Some(&root), &applicant(json!({})))
                .expect("evaluate");
            assert!(outcome.passed);
            assert!(outcome.trace.is_empty());
        }
    }

    #[test]
    fn and_group_requires_every_child_and_traces_all_of_them() {
        let root = ConditionNode::group(
            GroupOperator::And,
            vec![
                ConditionNode::leaf("age", ">=", json!(18)),
                ConditionNode::leaf("income", ">", json!(50000)),
            ],
        );
        let outcome = EligibilityEngine::default()
            .evaluate(Some(&root), &applicant(json!({"age": 30, "income": 20000})))
            .expect("evaluate");

        assert!(!outcome.passed);
        // No short-circuit: the failing second condition is still traced.
        assert_eq!(outcome.trace, vec!["age >= 18 ✓", "income > 50000 ✗"]);
    }

    #[test]
    fn or_group_passes_on_any_child_without_short_circuiting_the_trace() {
        let root = ConditionNode::group(
            GroupOperator::Or,
            vec![
                ConditionNode::leaf("state", "=", json!("CA")),
                ConditionNode::leaf("state", "=", json!("NY")),
            ],
        );
        let outcome = EligibilityEngine::default()
            .evaluate(Some(&root), &applicant(json!({"state": "CA"})))
            .expect("evaluate");

        assert!(outcome.passed);
        assert_eq!(outcome.trace.len(), 2);
    }

    #[test]
    fn nested_groups_trace_in_pre_order() {
        let root = ConditionNode::group(
            GroupOperator::And,
            vec![
                ConditionNode::leaf("age", ">=", json!(18)),
                ConditionNode::group(
                    GroupOperator::Or,
                    vec![
                        ConditionNode::leaf("state", "=", json!("CA")),
                        ConditionNode::leaf("income", ">", json!(90000)),
                    ],
                ),
            ],
        );
        let outcome = EligibilityEngine::default()
            .evaluate(
                Some(&root),
                &applicant(json!({"age": 40, "state": "TX", "income": 100000})),
            )
            .expect("evaluate");

        assert!(outcome.passed);
        assert_eq!(
            outcome.trace,
            vec!["age >= 18 ✓", "state = \"TX\" ✗", "income > 90000 ✓"]
        );
    }

    #[test]
    fn depth_bound_converts_runaway_nesting_into_an_error() {
        let mut root = ConditionNode::leaf("age", ">=", json!(18));
        for _ in 0..80 {
            root = ConditionNode::group(GroupOperator::And, vec![root]);
        }

        let error = EligibilityEngine::default()
            .evaluate(Some(&root), &applicant(json!({"age": 30})))
            .expect_err("must hit the depth bound");
        assert_eq!(error, EvaluationError::DepthExceeded { max_depth: 64 });
    }
}
