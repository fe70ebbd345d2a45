//! Result type alias for chatkit operations.

use super::api_error::ApiError;
use super::context::ErrorContext;

/// Type alias for Results using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> ApiResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn context(self, ctx: ErrorContext) -> ApiResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
