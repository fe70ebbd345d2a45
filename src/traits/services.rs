//! Service traits.
//!
//! One trait per backend capability. Each has a transport-backed default
//! implementation and a mock, selected when the
//! [`ServiceContext`](crate::context::ServiceContext) is built.

use async_trait::async_trait;
use bytes::Bytes;

use crate::chat::{ChatOptions, ChatStream};
use crate::error::ApiResult;
use crate::models::{ChatApiResponse, Message, SpeechAudio};

/// Chat with conversation history.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send one user turn and wait for the whole answer.
    ///
    /// On success both turns are appended to history; on failure history is
    /// left untouched.
    async fn send_message(
        &self,
        message: Message,
        options: &ChatOptions,
    ) -> ApiResult<ChatApiResponse>;

    /// Send one user turn and stream the answer.
    ///
    /// The user turn is appended before the request is built. The assistant
    /// turn is appended only when the stream completes.
    async fn send_stream_message(
        &self,
        message: Message,
        options: &ChatOptions,
    ) -> ApiResult<ChatStream>;

    /// Generate an image. `Ok(None)` means the backend finished without one.
    async fn generate_image(&self, prompt: &str, locale: &str) -> ApiResult<Option<String>>;

    /// Copy of the conversation so far.
    fn history(&self) -> Vec<Message>;

    fn add_to_history(&self, message: Message);

    fn clear_history(&self);
}

/// Text to speech.
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn text_to_speech(&self, text: &str, role_id: &str) -> ApiResult<SpeechAudio>;
}

/// Home screen recommendations.
#[async_trait]
pub trait HomeService: Send + Sync {
    /// Raw response body; its schema is owned by the caller.
    async fn fetch_home_data(&self, locale: &str) -> ApiResult<Bytes>;
}
