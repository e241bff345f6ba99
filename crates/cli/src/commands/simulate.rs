use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use polysim_core::config::{AppConfig, LoadOptions};
use polysim_core::domain::applicant::ApplicantData;
use polysim_core::domain::policy::{PolicyId, PolicyRecord};
use polysim_store::{
    InMemoryPolicyStore, InMemorySimulationResultStore, InMemoryVersionStore, SimulationService,
};

use crate::commands::{read_json, read_optional_json, CommandResult};

/// Runs one simulation against configuration documents loaded from files,
/// through the same service path the stored-policy flow uses.
pub fn run(
    applicant_path: &Path,
    rules_path: Option<&Path>,
    scoring_path: Option<&Path>,
    tree_path: Option<&Path>,
) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "simulate",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let applicant: ApplicantData = match read_json("simulate", applicant_path) {
        Ok(applicant) => applicant,
        Err(failure) => return failure,
    };
    let rules: Option<Value> = match read_optional_json("simulate", rules_path) {
        Ok(rules) => rules,
        Err(failure) => return failure,
    };
    let scoring: Option<Value> = match read_optional_json("simulate", scoring_path) {
        Ok(scoring) => scoring,
        Err(failure) => return failure,
    };
    let tree: Option<Value> = match read_optional_json("simulate", tree_path) {
        Ok(tree) => tree,
        Err(failure) => return failure,
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "simulate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let id = PolicyId::from("adhoc");
        let policies = InMemoryPolicyStore::default();
        policies.put_policy(PolicyRecord::new("adhoc")).await;
        if let Some(rules) = rules {
            policies.put_rules(&id, rules).await;
        }
        if let Some(scoring) = scoring {
            policies.put_scoring(&id, scoring).await;
        }
        if let Some(tree) = tree {
            policies.put_decision_tree(&id, tree).await;
        }

        let service = SimulationService::new(
            Arc::new(policies),
            Arc::new(InMemorySimulationResultStore::default()),
            Arc::new(InMemoryVersionStore::default()),
        )
        .with_max_depth(config.simulation.max_eval_depth)
        .with_history_limit(config.simulation.history_limit);
        service.simulate(&id, &applicant).await
    });

    match result {
        Ok(result) => CommandResult::success(&result),
        Err(error) => CommandResult::failure("simulate", "evaluation", error.to_string(), 4),
    }
}
