//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockTransport`] - transport with scripted bodies and line streams
//! - [`MockChatService`] - round-robin canned replies
//! - [`MockSpeechService`] - fixed audio bytes
//! - [`MockHomeService`] - fixed recommendations body

pub mod http;
pub mod services;

pub use http::{MockResponse, MockTransport};
pub use services::{MockChatService, MockHomeService, MockSpeechService};
