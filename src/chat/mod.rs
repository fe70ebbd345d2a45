//! Chat session service.
//!
//! Owns the conversation history and runs single-shot, streaming and image
//! calls against a [`Transport`](crate::traits::Transport).

mod image;
mod phase;
mod service;
mod stream;

pub use phase::CallPhase;
pub use service::{
    ChatOptions, DefaultChatService, DEFAULT_MODEL, DEFAULT_ROLE_ID, DEFAULT_TEMPERATURE,
};
pub use stream::{ChatStream, StreamEvent};
