//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
///
/// Records which call failed, against which model, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable name of the operation that failed.
    pub operation: String,

    /// Model identifier the call was made with, if any.
    pub model: Option<String>,

    /// Identifier of the individual call, for correlating log lines.
    pub call_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            model: None,
            call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the model for this context.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the call ID for this context.
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref model) = self.model {
            parts.push(format!("model={}", model));
        }

        if let Some(ref call_id) = self.call_id {
            parts.push(format!("call_id={}", call_id));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref model) = self.model {
            write!(f, " model={}", model)?;
        }

        Ok(())
    }
}
