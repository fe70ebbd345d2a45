//! Decode error types.
//!
//! Raised while turning wire text into typed values. A malformed SSE frame
//! only spoils its own line; the stream keeps going.

use thiserror::Error;

/// Errors raised while decoding backend payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// One `data: ` line carried a payload that is not a valid event envelope.
    #[error("Malformed frame '{line}': {message}")]
    MalformedFrame { line: String, message: String },

    /// A full (non-streaming) response body could not be decoded.
    #[error("Invalid response body: {message}")]
    InvalidBody { message: String },
}

impl DecodeError {
    /// Build a [`DecodeError::MalformedFrame`] for a given line.
    pub fn malformed(line: impl Into<String>, source: &serde_json::Error) -> Self {
        DecodeError::MalformedFrame {
            line: line.into(),
            message: source.to_string(),
        }
    }

    /// The offending line, for per-frame errors.
    pub fn line(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedFrame { line, .. } => Some(line),
            DecodeError::InvalidBody { .. } => None,
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DecodeError::MalformedFrame { .. } => "DECODE_MALFORMED_FRAME",
            DecodeError::InvalidBody { .. } => "DECODE_INVALID_BODY",
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidBody {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_keeps_line() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json}").unwrap_err();
        let err = DecodeError::malformed("data: {not json}", &json_err);
        assert_eq!(err.line(), Some("data: {not json}"));
        assert!(err.to_string().starts_with("Malformed frame 'data: {not json}'"));
    }

    #[test]
    fn test_from_serde_is_invalid_body() {
        let json_err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let err: DecodeError = json_err.into();
        assert!(matches!(err, DecodeError::InvalidBody { .. }));
        assert_eq!(err.line(), None);
    }
}
