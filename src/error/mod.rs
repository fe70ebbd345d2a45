//! Unified error handling for chatkit.
//!
//! - **Domain errors**: [`TransportError`] from the HTTP collaborator and
//!   [`DecodeError`] from payload decoding
//! - **Unified type**: [`ApiError`] wraps both, plus configuration and
//!   simulated (mock) failures
//! - **Context**: [`ErrorContext`] attaches the failing operation
//! - **Alias**: [`ApiResult<T>`]
//!
//! # Propagation
//!
//! | Error | Effect on a streaming call |
//! |-------|----------------------------|
//! | `DecodeError::MalformedFrame` | reported, stream continues |
//! | `TransportError` | call aborts, surfaced once |
//! | `ApiError::ConfigurationMissing` | fails at context construction |

mod api_error;
mod category;
mod context;
mod decode;
mod result;
mod transport;

pub use api_error::ApiError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use decode::DecodeError;
pub use result::{ApiResult, ResultExt};
pub use transport::{classify_reqwest_error, TransportError};
