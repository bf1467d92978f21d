//! Error types for export and pipeline operations
//!
//! Converting a message never fails; these errors come from the surfaces around it.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BabelError {
    /// Input was not valid JSON
    Parse(String),
    /// JSON was valid but not shaped like a Slack export record
    InvalidRecord(String),
    /// No stage with this name in the pipeline
    StageNotFound(String),
}

impl fmt::Display for BabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BabelError::Parse(msg) => write!(f, "Parse error: {msg}"),
            BabelError::InvalidRecord(msg) => write!(f, "Invalid export record: {msg}"),
            BabelError::StageNotFound(name) => write!(f, "Rewriter '{name}' not found"),
        }
    }
}

impl std::error::Error for BabelError {}

impl From<serde_json::Error> for BabelError {
    fn from(err: serde_json::Error) -> Self {
        BabelError::Parse(err.to_string())
    }
}
