use serde_json::json;

use polysim_core::config::{AppConfig, LoadOptions, LogFormat};

use crate::commands::CommandResult;

/// Reports the effective configuration after defaults, file, and
/// environment layering.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };

    CommandResult::success(&json!({
        "simulation": {
            "max_eval_depth": config.simulation.max_eval_depth,
            "history_limit": config.simulation.history_limit,
        },
        "logging": {
            "level": config.logging.level,
            "format": format,
        },
    }))
}
