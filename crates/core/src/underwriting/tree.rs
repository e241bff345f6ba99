use serde::{Deserialize, Serialize};

use crate::domain::applicant::ApplicantData;
use crate::domain::rule::GroupOperator;
use crate::domain::simulation::NO_DECISION;
use crate::domain::tree::{DecisionNode, GuardExpr};
use crate::errors::EvaluationError;

use super::condition::evaluate_leaf;
use super::MAX_EVAL_DEPTH;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeOutcome {
    pub decision: String,
    pub tier: Option<String>,
    pub trace: Vec<String>,
}

/// Boundary shape for direct tree test invocations. External consumers read
/// the evaluation path under both `trace` and `path`, so the report carries
/// the same lines twice; internally there is a single evaluator and a single
/// trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTestReport {
    pub decision: String,
    pub tier: Option<String>,
    pub trace: Vec<String>,
    pub path: Vec<String>,
}

impl From<TreeOutcome> for TreeTestReport {
    fn from(outcome: TreeOutcome) -> Self {
        Self {
            decision: outcome.decision,
            tier: outcome.tier,
            path: outcome.trace.clone(),
            trace: outcome.trace,
        }
    }
}

/// Walks a condition/action tree to a final decision and tier. Trees are
/// untrusted input, so the walk carries a depth counter instead of assuming
/// the structure is acyclic.
#[derive(Clone, Copy, Debug)]
pub struct DecisionTreeEngine {
    max_depth: usize,
}

impl Default for DecisionTreeEngine {
    fn default() -> Self {
        Self { max_depth: MAX_EVAL_DEPTH }
    }
}

impl DecisionTreeEngine {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn evaluate(
        &self,
        root: &DecisionNode,
        data: &ApplicantData,
    ) -> Result<TreeOutcome, EvaluationError> {
        let mut trace = Vec::new();
        let (decision, tier) = self.walk(root, data, &mut trace, 0)?;
        Ok(TreeOutcome { decision, tier, trace })
    }

    fn walk(
        &self,
        node: &DecisionNode,
        data: &ApplicantData,
        trace: &mut Vec<String>,
        depth: usize,
    ) -> Result<(String, Option<String>), EvaluationError> {
        if depth >= self.max_depth {
            return Err(EvaluationError::DepthExceeded { max_depth: self.max_depth });
        }

        match node {
            DecisionNode::Terminal(terminal) => {
                Ok((terminal.action.clone(), terminal.tier.clone()))
            }
            DecisionNode::Undetermined(_) => Ok((NO_DECISION.to_string(), None)),
            DecisionNode::Condition(branch) => {
                let met = evaluate_guard(&branch.guard, data, trace);
                let next =
                    if met { Some(branch.then.as_ref()) } else { branch.otherwise.as_deref() };
                match next {
                    Some(next) => self.walk(next, data, trace, depth + 1),
                    // Missing branch: sentinel decision, no extra trace.
                    None => Ok((NO_DECISION.to_string(), None)),
                }
            }
        }
    }
}

/// Guard lines land in the trace before the taken branch is descended.
/// All guard group members are evaluated; no boolean short-circuit.
fn evaluate_guard(guard: &GuardExpr, data: &ApplicantData, trace: &mut Vec<String>) -> bool {
    match guard {
        GuardExpr::Leaf(leaf) => {
            let outcome = evaluate_leaf(leaf, data);
            trace.push(outcome.line);
            outcome.met
        }
        GuardExpr::Group(group) => {
            let outcomes: Vec<_> =
                group.conditions.iter().map(|leaf| evaluate_leaf(leaf, data)).collect();
            let met = match group.operator {
                GroupOperator::And => outcomes.iter().all(|outcome| outcome.met),
                GroupOperator::Or => outcomes.iter().any(|outcome| outcome.met),
            };
            trace.extend(outcomes.into_iter().map(|outcome| outcome.line));
            met
        }
    }
}
