//! Error types for backend calls.

use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;

/// A failed call to the content-production backend.
///
/// Every variant counts as a network failure for the stage that made the
/// call: the stage is marked failed and the chain halts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout,
    /// TLS failure, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {0}")]
    Decode(String),
}

impl BackendError {
    /// Builds a status error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"error": "..."}`; when the body has
    /// that shape only the message is kept, otherwise the raw body is.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error").and_then(serde_json::Value::as_str).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        BackendError::Status { status, message }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_is_extracted_from_json_body() {
        let err = BackendError::from_status(400, r#"{"error": "Missing required field: topic"}"#);
        assert_eq!(
            err,
            BackendError::Status {
                status: 400,
                message: "Missing required field: topic".to_string()
            }
        );
    }

    #[test]
    fn test_plain_body_is_kept() {
        let err = BackendError::from_status(502, " Bad Gateway \n");
        assert_eq!(err.to_string(), "API error (status 502): Bad Gateway");
    }
}
