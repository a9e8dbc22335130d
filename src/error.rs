//! Error types for HIBP API operations.

use thiserror::Error;

/// Errors that can occur while talking to the HIBP API.
///
/// Transport failures are deliberately absent: [`crate::Factory::get`] folds
/// them into a failed [`crate::Response`] instead.
#[derive(Debug, Error)]
pub enum PwnedError {
    /// Configuration is missing or incomplete.
    #[error("HIBP configuration required: {0}")]
    ConfigMissing(String),

    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response was valid JSON of the wrong top-level kind.
    #[error("Unexpected response shape: expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    /// Building the underlying HTTP client failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl PwnedError {
    pub(crate) fn unexpected_shape(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            expected,
            found: json_kind(found),
        }
    }
}

/// Human-readable name of a JSON value's kind.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type alias for HIBP operations.
pub type Result<T> = core::result::Result<T, PwnedError>;
