//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Transport`] - HTTP collaborator (single-shot and line-streamed requests)
//! - [`ChatService`] - chat with history, streaming and image generation
//! - [`SpeechService`] - text to speech
//! - [`HomeService`] - home screen recommendations

pub mod services;
pub mod transport;

pub use services::{ChatService, HomeService, SpeechService};
pub use transport::{Headers, HttpMethod, HttpRequest, LineStream, Transport};
