use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::clause::Clause;
use super::policy::{PolicyId, PolicyRecord};
use super::rule::ConditionNode;
use super::scoring::ScoringConfig;
use super::tree::DecisionNode;

/// Immutable bundle of everything configured for a policy at a version
/// point. Absent documents serialize as explicit nulls so two snapshots
/// always diff over the same key set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSnapshot {
    pub policy: PolicyRecord,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rules: Option<ConditionNode>,
    pub scoring: Option<ScoringConfig>,
    pub decision_tree: Option<DecisionNode>,
    pub clauses: Option<Vec<Clause>>,
}

/// A stored snapshot keyed by (policy id, version number).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVersion {
    pub id: String,
    pub policy_id: PolicyId,
    pub version_number: i32,
    pub snapshot: VersionSnapshot,
    #[serde(default)]
    pub status: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
}

/// One structural difference between two snapshots, addressed by a
/// dot-separated path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEntry {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl DiffEntry {
    pub fn added(path: impl Into<String>, new_value: Value) -> Self {
        Self { kind: DiffKind::Added, path: path.into(), old_value: None, new_value: Some(new_value) }
    }

    pub fn removed(path: impl Into<String>, old_value: Value) -> Self {
        Self { kind: DiffKind::Removed, path: path.into(), old_value: Some(old_value), new_value: None }
    }

    pub fn modified(path: impl Into<String>, old_value: Value, new_value: Value) -> Self {
        Self {
            kind: DiffKind::Modified,
            path: path.into(),
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }
}

/// Two loaded versions and their structural diff, as returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub base: PolicyVersion,
    pub compare: PolicyVersion,
    pub diff: Vec<DiffEntry>,
}
