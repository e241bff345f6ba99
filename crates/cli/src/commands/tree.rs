use std::path::Path;

use polysim_core::config::{AppConfig, LoadOptions};
use polysim_core::domain::applicant::ApplicantData;
use polysim_core::domain::tree::DecisionNode;
use polysim_core::underwriting::{DecisionTreeEngine, TreeTestReport};

use crate::commands::{read_json, CommandResult};

/// Evaluates a decision tree in isolation against sample applicant data.
pub fn run(tree_path: &Path, data_path: &Path) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "tree-test",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let root: DecisionNode = match read_json("tree-test", tree_path) {
        Ok(root) => root,
        Err(failure) => return failure,
    };
    let data: ApplicantData = match read_json("tree-test", data_path) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    let engine = DecisionTreeEngine::with_max_depth(config.simulation.max_eval_depth);
    match engine.evaluate(&root, &data) {
        Ok(outcome) => CommandResult::success(&TreeTestReport::from(outcome)),
        Err(error) => CommandResult::failure("tree-test", "evaluation", error.to_string(), 4),
    }
}
