use std::path::Path;

use serde_json::Value;

use polysim_core::versioning::VersionDiffEngine;

use crate::commands::{read_json, CommandResult};

/// Structural diff between two JSON documents, base against compare.
pub fn run(base_path: &Path, compare_path: &Path) -> CommandResult {
    let base: Value = match read_json("diff", base_path) {
        Ok(base) => base,
        Err(failure) => return failure,
    };
    let compare: Value = match read_json("diff", compare_path) {
        Ok(compare) => compare,
        Err(failure) => return failure,
    };

    CommandResult::success(&VersionDiffEngine.compute_diff(&base, &compare))
}
