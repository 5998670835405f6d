//! Error types for the data-access layer.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 401 — the session has been torn down and views have been
    /// notified before this error is returned. Terminal, never retried.
    #[error("session expired")]
    AuthExpired,

    /// Any other non-2xx status. Carries the backend's message when the
    /// response body had one. Validation rejections arrive here too; they
    /// differ only in message text.
    #[error("request failed ({status}): {message}")]
    Transport { status: u16, message: String },

    /// Network-level failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns true if this error means the session ended.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ClientError::AuthExpired)
    }

    /// The text a view should surface in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
