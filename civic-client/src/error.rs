//! Client error types

use shared::ValidationError;
use shared::response::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, TLS, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid credentials or missing/expired token
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (often an already-deleted complaint)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected input, either by the server or by a form check
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success response
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential store I/O
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Operation not allowed in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification used to pick what the user is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Authentication,
    Validation,
    NotFound,
    Server,
}

const GENERIC_NETWORK_MESSAGE: &str = "Network error. Check your connection and try again.";
const GENERIC_SERVER_MESSAGE: &str = "Something went wrong. Please try again later.";

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(e) if e.is_decode() => ErrorKind::Server,
            Self::Http(_) => ErrorKind::Network,
            Self::Unauthorized(_) | Self::Forbidden(_) => ErrorKind::Authentication,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Api { .. }
            | Self::Internal(_)
            | Self::InvalidResponse(_)
            | Self::Serialization(_)
            | Self::Storage(_)
            | Self::InvalidState(_) => ErrorKind::Server,
        }
    }

    /// Message sent by the server (or by a form check), if any
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::Api { message: m, .. } => m.as_str(),
            _ => return None,
        };
        (!message.trim().is_empty()).then_some(message)
    }

    /// The server's message, or `fallback` when there is none
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Terse, user-facing text for this failure
    pub fn user_message(&self) -> String {
        let fallback = match self.kind() {
            ErrorKind::Network => GENERIC_NETWORK_MESSAGE,
            _ => GENERIC_SERVER_MESSAGE,
        };
        self.message_or(fallback)
    }

    /// Map a non-success status and its raw body to an error.
    ///
    /// The backend sends `{"message": "..."}`. Any other body (a proxy's
    /// HTML page, plain text) carries no message, so the caller's fallback
    /// text is shown instead.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(b) => b.message,
            Err(_) => {
                tracing::debug!(status, body = %body.trim(), "error body without a message");
                String::new()
            }
        };
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Api { status, message },
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.message)
    }
}
