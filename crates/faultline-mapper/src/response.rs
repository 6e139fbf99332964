use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error body sent to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Identifier of the node that served the request
    pub instance: String,
    /// HTTP status, equal to the response status
    pub status: u16,
    /// Failure message, `null` when the failure had none
    pub message: Option<String>,
    /// Whether the caller may retry the request
    pub retryable: bool,
}

/// Result of handling one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Write `body` with `status`
    Respond { status: StatusCode, body: ErrorResponse },
    /// Connection is gone, nothing is written
    Suppressed,
}

impl Outcome {
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Respond { status, .. } => Some(*status),
            Self::Suppressed => None,
        }
    }

    pub const fn body(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Respond { body, .. } => Some(body),
            Self::Suppressed => None,
        }
    }
}
