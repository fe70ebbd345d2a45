//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - HTTP transport using reqwest
//! - [`DefaultSpeechService`] - text to speech over a transport
//! - [`DefaultHomeService`] - home recommendations over a transport
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for the transport and every
//! service.

pub mod mock;
pub mod reqwest_http;
pub mod services;

pub use mock::{MockChatService, MockHomeService, MockResponse, MockSpeechService, MockTransport};
pub use reqwest_http::ReqwestTransport;
pub use services::{DefaultHomeService, DefaultSpeechService};
