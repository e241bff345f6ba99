use std::path::Path;

use polysim_core::domain::applicant::ApplicantData;
use polysim_core::domain::scoring::ScoringConfig;
use polysim_core::underwriting::ScoringEngine;

use crate::commands::{read_json, CommandResult};

/// Scores sample applicant data against a scoring config.
pub fn run_score(scoring_path: &Path, data_path: &Path) -> CommandResult {
    let config: ScoringConfig = match read_json("score", scoring_path) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let data: ApplicantData = match read_json("score", data_path) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    CommandResult::success(&ScoringEngine.score(Some(&config), &data))
}

/// Structural check of a scoring config: weight totals and empty categories.
pub fn run_check(scoring_path: &Path) -> CommandResult {
    let config: ScoringConfig = match read_json("check-scoring", scoring_path) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let validation = ScoringEngine.validate(Some(&config));
    let exit_code = if validation.valid { 0 } else { 1 };
    let mut result = CommandResult::success(&validation);
    result.exit_code = exit_code;
    result
}
