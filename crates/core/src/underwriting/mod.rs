//! Rule evaluation engines: eligibility gating, weighted scoring, decision
//! tree classification, and the pipeline that sequences them.

pub mod condition;
pub mod eligibility;
pub mod pipeline;
pub mod scoring;
pub mod sql;
pub mod tree;
pub mod validation;

/// Recursion ceiling shared by every tree-walking engine. Configuration
/// documents are user-authored, so depth is bounded rather than trusted.
pub const MAX_EVAL_DEPTH: usize = 64;

pub use condition::{compare, evaluate_leaf, Comparator, LeafOutcome};
pub use eligibility::{EligibilityEngine, EligibilityOutcome};
pub use pipeline::{PolicyConfiguration, SimulationPipeline, SCORE_FIELD};
pub use scoring::{ScoreOutcome, ScoringEngine, ScoringValidation};
pub use sql::rule_to_sql;
pub use tree::{DecisionTreeEngine, TreeOutcome, TreeTestReport};
pub use validation::validate_policy;
