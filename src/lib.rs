//! chatkit - client kit for a streaming chat, speech and image backend
//!
//! The core is the streaming chat session: server-sent event lines are
//! decoded into frames, partial assistant output is aggregated, and the
//! conversation history is reconciled as calls complete.

pub mod adapters;
pub mod aggregate;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod logging;
pub mod models;
pub mod request;
pub mod sse;
pub mod traits;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
