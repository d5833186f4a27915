//! Failure taxonomy of remote operations.

use thiserror::Error;

use crate::insights::{Endpoint, MALFORMED_RESPONSE_MESSAGE};

/// Why an operation ended in `Failed`.
///
/// The variant only decides the message text; every variant is recoverable
/// by submitting again. `detail` fields carry diagnostics for the logs and
/// are never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Local precondition failure; the remote service was not contacted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The call could not complete.
    #[error("{endpoint} transport failure: {detail}")]
    Transport { endpoint: Endpoint, detail: String },

    /// The service answered and reported failure.
    #[error("{endpoint} reported failure: {message}")]
    Remote { endpoint: Endpoint, message: String },

    /// The service answered with an unexpected shape.
    #[error("{endpoint} returned a malformed response: {detail}")]
    MalformedResponse { endpoint: Endpoint, detail: String },
}

impl RequestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(endpoint: Endpoint, detail: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            detail: detail.into(),
        }
    }

    pub fn remote(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Remote {
            endpoint,
            message: message.into(),
        }
    }

    pub fn malformed(endpoint: Endpoint, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint,
            detail: detail.into(),
        }
    }

    /// Stable text for the `Failed` state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Transport { endpoint, .. } => endpoint.transport_failure_message().to_string(),
            Self::Remote { endpoint, message } => {
                let message = message.trim();
                if message.is_empty() {
                    endpoint.remote_failure_fallback().to_string()
                } else {
                    message.to_string()
                }
            }
            Self::MalformedResponse { .. } => MALFORMED_RESPONSE_MESSAGE.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport { .. } => "transport",
            Self::Remote { .. } => "remote",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
