pub use chrono;

pub mod config;
pub mod domain;
pub mod errors;
pub mod underwriting;
pub mod versioning;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::applicant::ApplicantData;
pub use domain::clause::{Clause, ClauseDocument};
pub use domain::policy::{PolicyId, PolicyRecord};
pub use domain::rule::{ConditionGroup, ConditionLeaf, ConditionNode, GroupOperator};
pub use domain::scoring::{ScoringCategory, ScoringConfig, ScoringParameter};
pub use domain::simulation::{
    CompletedSteps, PolicyValidationReport, SimulationRecord, SimulationResult,
};
pub use domain::tree::{ConditionBranch, DecisionNode, GuardExpr, TerminalNode};
pub use domain::version::{DiffEntry, DiffKind, PolicyVersion, VersionComparison, VersionSnapshot};
pub use errors::EvaluationError;
pub use underwriting::{
    rule_to_sql, validate_policy, DecisionTreeEngine, EligibilityEngine, PolicyConfiguration,
    ScoringEngine, SimulationPipeline, TreeTestReport,
};
pub use versioning::{DiffError, VersionDiffEngine};
