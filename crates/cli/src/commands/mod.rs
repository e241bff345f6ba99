pub mod config;
pub mod diff;
pub mod scoring;
pub mod simulate;
pub mod sql;
pub mod tree;
pub mod validate;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandFailure {
    command: String,
    status: String,
    error_class: String,
    message: String,
}

impl CommandResult {
    /// Pretty-prints the command's payload as JSON.
    pub fn success(payload: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure("output", "serialization", error.to_string(), 1),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandFailure {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: error_class.to_string(),
            message: message.into(),
        };
        let output = serde_json::to_string(&payload).unwrap_or_else(|error| {
            format!(
                "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
                error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        });
        Self { exit_code, output }
    }
}

/// Loads and decodes one JSON input file, reporting the offending path on
/// failure.
pub(crate) fn read_json<T: DeserializeOwned>(
    command: &str,
    path: &Path,
) -> Result<T, CommandResult> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        CommandResult::failure(
            command,
            "input_read",
            format!("could not read `{}`: {error}", path.display()),
            2,
        )
    })?;

    serde_json::from_str(&raw).map_err(|error| {
        CommandResult::failure(
            command,
            "input_decode",
            format!("could not decode `{}`: {error}", path.display()),
            2,
        )
    })
}

/// Same as `read_json`, for inputs the caller may omit entirely.
pub(crate) fn read_optional_json<T: DeserializeOwned>(
    command: &str,
    path: Option<&Path>,
) -> Result<Option<T>, CommandResult> {
    path.map(|path| read_json(command, path)).transpose()
}
