//! Outward client facade.
//!
//! [`ApiClient`] wraps a [`ServiceContext`] and exposes the operations an
//! application calls: plain strings in, plain results out.

use bytes::Bytes;

use crate::chat::{ChatOptions, ChatStream};
use crate::config::ApiConfig;
use crate::context::ServiceContext;
use crate::error::ApiResult;
use crate::models::{Message, SpeechAudio};

/// High-level client for the chat backend.
///
/// # Example
///
/// ```ignore
/// use chatkit::ApiClient;
///
/// let client = ApiClient::with_api_key("secret")?;
/// let answer = client.send_message("Hello").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    context: ServiceContext,
    options: ChatOptions,
}

impl ApiClient {
    pub fn new(context: ServiceContext) -> Self {
        Self {
            context,
            options: ChatOptions::default(),
        }
    }

    /// Client for the default backend.
    pub fn with_api_key(api_key: impl Into<String>) -> ApiResult<Self> {
        let context = ServiceContext::builder()
            .with_config(ApiConfig::new(api_key))
            .build()?;
        Ok(Self::new(context))
    }

    /// Client configured from `CHATKIT_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(ServiceContext::from_env()?))
    }

    /// Client backed by mock services replying from `responses`.
    pub fn mock(responses: Vec<String>) -> Self {
        Self::new(ServiceContext::mock(responses))
    }

    /// Options used by every chat call made through this client.
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Send a user message and return the assistant's reply text.
    pub async fn send_message(&self, content: &str) -> ApiResult<String> {
        let response = self
            .context
            .chat()
            .send_message(Message::user(content), &self.options)
            .await?;
        Ok(response.data.content)
    }

    /// Send a user message and stream the reply.
    pub async fn send_stream_message(&self, content: &str) -> ApiResult<ChatStream> {
        self.context
            .chat()
            .send_stream_message(Message::user(content), &self.options)
            .await
    }

    /// Generate an image; `None` when the backend finished without one.
    pub async fn generate_image(&self, prompt: &str, locale: &str) -> ApiResult<Option<String>> {
        self.context.chat().generate_image(prompt, locale).await
    }

    /// Synthesize speech. Failures are logged and yield `None`.
    pub async fn text_to_speech(&self, text: &str, role_id: &str) -> Option<SpeechAudio> {
        match self.context.speech().text_to_speech(text, role_id).await {
            Ok(audio) => Some(audio),
            Err(err) => {
                tracing::warn!(code = err.error_code(), "Speech request failed: {}", err);
                None
            }
        }
    }

    /// Raw home screen recommendations.
    pub async fn fetch_home_recommendations(&self, locale: &str) -> ApiResult<Bytes> {
        self.context.home().fetch_home_data(locale).await
    }

    pub fn message_history(&self) -> Vec<Message> {
        self.context.chat().history()
    }

    pub fn clear_history(&self) {
        self.context.chat().clear_history();
    }
}
