use std::path::Path;

use serde::Serialize;

use polysim_core::domain::rule::ConditionNode;
use polysim_core::underwriting::rule_to_sql;

use crate::commands::{read_json, CommandResult};

#[derive(Debug, Serialize)]
struct SqlPreview {
    sql: String,
}

/// Renders a rule tree as its SQL WHERE-clause preview.
pub fn run(rules_path: &Path) -> CommandResult {
    let root: ConditionNode = match read_json("sql", rules_path) {
        Ok(root) => root,
        Err(failure) => return failure,
    };

    CommandResult::success(&SqlPreview { sql: rule_to_sql(Some(&root)) })
}
