use thiserror::Error;

/// Failures raised while evaluating a rule tree, scoring config, or decision
/// tree. Missing configuration is never an error; engines resolve it to
/// default-pass, zero score, or default decision bands.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("evaluation depth exceeded maximum of {max_depth}; the rule or tree is too deep or cyclic")]
    DepthExceeded { max_depth: usize },
    #[error("malformed {document} document: {message}")]
    MalformedDocument { document: String, message: String },
}

impl EvaluationError {
    pub fn malformed(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument { document: document.into(), message: message.into() }
    }
}
