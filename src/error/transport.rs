//! Transport-level error types.
//!
//! These errors come from the HTTP collaborator: the request never produced a
//! usable response, or the response stream broke part way through.

use thiserror::Error;

/// Errors surfaced by a [`Transport`](crate::traits::Transport).
///
/// A transport error aborts the call it belongs to. It is reported to the
/// caller exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The response was not an HTTP response, or could not be read.
    #[error("Invalid response received")]
    InvalidResponse,

    /// The server answered with a non-2xx status.
    #[error("HTTP error with status code: {status}")]
    HttpStatus { status: u16, message: String },

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport gave up waiting.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The call was cancelled before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// Reading the body failed mid-stream.
    #[error("IO error: {0}")]
    Io(String),
}

impl TransportError {
    /// Build an [`TransportError::HttpStatus`] from a status code and body text.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        TransportError::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed(_) | TransportError::Timeout(_) => true,
            TransportError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            TransportError::Io(_) => true,
            TransportError::InvalidResponse | TransportError::Cancelled => false,
        }
    }

    /// Whether the failure is a timeout, as opposed to any other kind.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }

    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::InvalidResponse => "TRANSPORT_INVALID_RESPONSE",
            TransportError::HttpStatus { .. } => "TRANSPORT_HTTP_STATUS",
            TransportError::ConnectionFailed(_) => "TRANSPORT_CONNECTION_FAILED",
            TransportError::Timeout(_) => "TRANSPORT_TIMEOUT",
            TransportError::Cancelled => "TRANSPORT_CANCELLED",
            TransportError::Io(_) => "TRANSPORT_IO",
        }
    }
}

/// Classify a reqwest error into a [`TransportError`].
pub fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::ConnectionFailed(err.to_string())
    } else if let Some(status) = err.status() {
        TransportError::http_status(status.as_u16(), err.to_string())
    } else if err.is_body() || err.is_decode() {
        TransportError::Io(err.to_string())
    } else {
        TransportError::InvalidResponse
    }
}
