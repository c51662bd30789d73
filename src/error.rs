//! Error types for console operations
//!
//! Errors are classified the way the screens surface them:
//! - Validation: rendered inline next to the offending form fields
//! - OperationFailed / Unexpected: surfaced as a dismissible toast
//! - NotFound / Duplicate: surfaced as a toast, the user retries manually

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::FieldErrors;

/// Error types for console operations
#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    // Simulated server-action failure
    #[error("{0}")]
    OperationFailed(String),

    // Catch-all: anything else, stringified
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl ConsoleError {
    /// Returns true if the user can simply try the same operation again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ConsoleError::OperationFailed(_) | ConsoleError::Unexpected(_)
        )
    }

    /// Returns true if this error belongs next to form fields rather than in a toast
    pub fn is_inline(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConsoleError::Validation(_) => "Fix the highlighted fields and submit again.",
            ConsoleError::NotFound { .. } => "The record may have been removed. Refresh the list.",
            ConsoleError::Duplicate { .. } => "Pick a different identifier and try again.",
            ConsoleError::OperationFailed(_) => "Try again in a moment.",
            ConsoleError::Unexpected(_) => "Try again. If this keeps happening, reload the page.",
            ConsoleError::Config(_) => "Check your configuration in ~/.crmdesk/config.json",
            ConsoleError::Io(_) => "Check file permissions and disk space.",
        }
    }

    /// Stringify any error into the catch-all variant.
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        ConsoleError::Unexpected(err.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Io(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ConsoleError {
    fn from(err: tokio::task::JoinError) -> Self {
        ConsoleError::unexpected(err)
    }
}

/// The `{ "error": "..." }` shape returned by a failed server action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub error: String,
}

impl From<&ConsoleError> for ActionError {
    fn from(err: &ConsoleError) -> Self {
        ActionError {
            error: err.to_string(),
        }
    }
}

/// Result of a server action as seen by the UI.
///
/// Serializes to either the payload itself or `{ "error": "..." }`, never both.
/// Payload types must not carry a field named `error`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActionResponse<T> {
    Data(T),
    Error(ActionError),
}

impl<T> ActionResponse<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, ActionResponse::Error(_))
    }

    pub fn into_result(self) -> Result<T, ActionError> {
        match self {
            ActionResponse::Data(data) => Ok(data),
            ActionResponse::Error(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, ConsoleError>> for ActionResponse<T> {
    fn from(result: Result<T, ConsoleError>) -> Self {
        match result {
            Ok(data) => ActionResponse::Data(data),
            Err(err) => ActionResponse::Error(ActionError::from(&err)),
        }
    }
}

/// Serializable error representation for the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayError {
    pub message: String,
    pub error_type: ErrorType,
    pub can_retry: bool,
    pub recovery_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Inline,
    Toast,
}

impl From<&ConsoleError> for DisplayError {
    fn from(err: &ConsoleError) -> Self {
        DisplayError {
            message: err.to_string(),
            error_type: if err.is_inline() {
                ErrorType::Inline
            } else {
                ErrorType::Toast
            },
            can_retry: err.is_retryable(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        id: String,
    }

    #[test]
    fn test_action_response_data_has_no_error_field() {
        let resp: ActionResponse<Payload> = Ok(Payload { id: "c1".into() }).into();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], "c1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_action_response_error_shape() {
        let resp: ActionResponse<Payload> =
            Err(ConsoleError::OperationFailed("Failed to delete company".into())).into();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Failed to delete company" }));
        assert!(resp.is_error());
    }

    #[test]
    fn test_display_error_classification() {
        let inline = DisplayError::from(&ConsoleError::Validation(FieldErrors::default()));
        assert_eq!(inline.error_type, ErrorType::Inline);
        assert!(!inline.can_retry);

        let toast = DisplayError::from(&ConsoleError::unexpected("boom"));
        assert_eq!(toast.error_type, ErrorType::Toast);
        assert!(toast.can_retry);
        assert_eq!(toast.message, "Unexpected error: boom");
    }
}
