//! Structural diff between two policy version snapshots.

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use crate::domain::version::{DiffEntry, VersionSnapshot};

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to encode snapshot for comparison: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Produces a flat change list between two JSON documents. Paths are
/// dot-joined object keys; entries come out in canonical key order so two
/// comparisons of the same snapshots always read identically.
#[derive(Clone, Copy, Debug, Default)]
pub struct VersionDiffEngine;

impl VersionDiffEngine {
    pub fn diff_snapshots(
        &self,
        base: &VersionSnapshot,
        compare: &VersionSnapshot,
    ) -> Result<Vec<DiffEntry>, DiffError> {
        let base = serde_json::to_value(base)?;
        let compare = serde_json::to_value(compare)?;
        Ok(self.compute_diff(&base, &compare))
    }

    pub fn compute_diff(&self, base: &Value, compare: &Value) -> Vec<DiffEntry> {
        let mut changes = Vec::new();
        diff_objects(base, compare, "", &mut changes);
        changes
    }
}

fn diff_objects(base: &Value, compare: &Value, path: &str, changes: &mut Vec<DiffEntry>) {
    let empty = serde_json::Map::new();
    let base_map = base.as_object().unwrap_or(&empty);
    let compare_map = compare.as_object().unwrap_or(&empty);

    let keys: BTreeSet<&String> = base_map.keys().chain(compare_map.keys()).collect();

    for key in keys {
        let current_path =
            if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
        match (base_map.get(key), compare_map.get(key)) {
            (None, Some(added)) => changes.push(DiffEntry::added(current_path, added.clone())),
            (Some(removed), None) => {
                changes.push(DiffEntry::removed(current_path, removed.clone()));
            }
            (Some(old), Some(new)) => {
                if old.is_object() && new.is_object() {
                    diff_objects(old, new, &current_path, changes);
                } else if old != new {
                    changes.push(DiffEntry::modified(current_path, old.clone(), new.clone()));
                }
            }
            (None, None) => {}
        }
    }
}
