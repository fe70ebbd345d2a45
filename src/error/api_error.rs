//! Unified error type for chatkit.
//!
//! `ApiError` consolidates the transport, decode and configuration errors so
//! every public operation can return one type.

use thiserror::Error;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::decode::DecodeError;
use super::transport::TransportError;

/// Unified error type for chatkit operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed (non-2xx, connection, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Serialization(String),

    /// Fault injected by a mock collaborator.
    #[error("Simulated error for testing")]
    Simulated,

    /// A required collaborator or setting was not provided.
    #[error("Required configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// Wrapped error with additional context.
    #[error("{error} ({context})")]
    WithContext {
        error: Box<ApiError>,
        context: ErrorContext,
    },
}

impl ApiError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(TransportError::HttpStatus { .. }) => ErrorCategory::Server,
            ApiError::Transport(TransportError::InvalidResponse) => ErrorCategory::Server,
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Decode(_) | ApiError::Serialization(_) => ErrorCategory::Client,
            ApiError::Simulated => ErrorCategory::Simulated,
            ApiError::ConfigurationMissing(_) => ErrorCategory::Configuration,
            ApiError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(err) => err.is_retryable(),
            ApiError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(err) => err.error_code(),
            ApiError::Decode(err) => err.error_code(),
            ApiError::Serialization(_) => "REQUEST_SERIALIZATION",
            ApiError::Simulated => "SIMULATED",
            ApiError::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            ApiError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ApiError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ApiError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &ApiError {
        match self {
            ApiError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// The transport error underneath, if that is what failed.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self.inner() {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.into())
    }
}
