//! Transport-backed chat service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::image::run_image_session;
use super::phase::{CallPhase, PhaseTracker};
use super::stream::{spawn_chat_stream, ChatStream};
use crate::aggregate::ImageOutcome;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult, DecodeError, ErrorContext};
use crate::history::HistoryStore;
use crate::models::{ChatApiResponse, ChatRequest, Message};
use crate::request::{build_chat_request, build_image_request, RequestBuilder};
use crate::traits::{ChatService, Transport};

/// Default model name
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
/// Default persona identifier
pub const DEFAULT_ROLE_ID: &str = "default";

/// Per-call chat parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    /// Passed through unvalidated
    pub temperature: f64,
    pub role_id: String,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            role_id: DEFAULT_ROLE_ID.to_string(),
        }
    }
}

impl ChatOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }
}

/// Chat service that talks to the backend through a [`Transport`].
///
/// Every call made through one instance shares its [`HistoryStore`].
pub struct DefaultChatService {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
    history: HistoryStore,
    stream_buffer: usize,
}

impl DefaultChatService {
    pub fn new(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        Self {
            transport,
            stream_buffer: config.stream_buffer,
            builder: RequestBuilder::new(config),
            history: HistoryStore::new(),
        }
    }

    /// Use an existing history instead of an empty one.
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = history;
        self
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    /// Perform a single-shot chat request and decode the reply.
    async fn exchange(
        &self,
        payload: &ChatRequest,
        phase: &mut PhaseTracker,
    ) -> ApiResult<ChatApiResponse> {
        let request = self.builder.chat(payload)?;
        phase.advance(CallPhase::InFlight);
        let body = self.transport.perform_request(&request).await?;
        phase.advance(CallPhase::Completing);
        serde_json::from_slice(&body).map_err(|e| ApiError::from(DecodeError::from(e)))
    }

    fn context(operation: &str, call_id: Uuid, model: Option<&str>) -> ErrorContext {
        let ctx = ErrorContext::new(operation).with_call_id(call_id.to_string());
        match model {
            Some(model) => ctx.with_model(model),
            None => ctx,
        }
    }
}

impl std::fmt::Debug for DefaultChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultChatService")
            .field("base_url", &self.builder.config().base_url)
            .field("history_len", &self.history.len())
            .field("stream_buffer", &self.stream_buffer)
            .finish()
    }
}

#[async_trait]
impl ChatService for DefaultChatService {
    async fn send_message(
        &self,
        message: Message,
        options: &ChatOptions,
    ) -> ApiResult<ChatApiResponse> {
        let call_id = Uuid::new_v4();
        let mut phase = PhaseTracker::new(call_id, "send_message");
        phase.advance(CallPhase::Building);

        let mut messages = self.history.snapshot();
        messages.push(message.clone());
        let payload = build_chat_request(
            &messages,
            &options.model,
            options.temperature,
            false,
            &options.role_id,
        );

        match self.exchange(&payload, &mut phase).await {
            Ok(response) => {
                self.history.extend([message, response.to_message()]);
                phase.advance(CallPhase::Done);
                tracing::info!(
                    call_id = %call_id,
                    code = response.code,
                    chars = response.data.content.len(),
                    "Chat message completed"
                );
                Ok(response)
            }
            Err(err) => {
                phase.advance(CallPhase::Failed);
                tracing::warn!(call_id = %call_id, "Chat message failed: {}", err);
                Err(err.with_context(Self::context(
                    "send_message",
                    call_id,
                    Some(&options.model),
                )))
            }
        }
    }

    async fn send_stream_message(
        &self,
        message: Message,
        options: &ChatOptions,
    ) -> ApiResult<ChatStream> {
        let call_id = Uuid::new_v4();
        let mut phase = PhaseTracker::new(call_id, "send_stream_message");
        phase.advance(CallPhase::Building);

        let messages = self.history.append_and_snapshot(message);
        let payload = build_chat_request(
            &messages,
            &options.model,
            options.temperature,
            true,
            &options.role_id,
        );

        let request = match self.builder.chat(&payload) {
            Ok(request) => request,
            Err(err) => {
                phase.advance(CallPhase::Failed);
                return Err(err.with_context(Self::context(
                    "send_stream_message",
                    call_id,
                    Some(&options.model),
                )));
            }
        };

        tracing::debug!(call_id = %call_id, turns = messages.len(), "Starting chat stream");
        Ok(spawn_chat_stream(
            phase,
            self.transport.clone(),
            request,
            self.history.clone(),
            self.stream_buffer,
        ))
    }

    async fn generate_image(&self, prompt: &str, locale: &str) -> ApiResult<Option<String>> {
        let call_id = Uuid::new_v4();
        let mut phase = PhaseTracker::new(call_id, "generate_image");
        phase.advance(CallPhase::Building);

        let payload = build_image_request(prompt, locale);
        let result = match self.builder.image(&payload) {
            Ok(request) => run_image_session(phase, self.transport.as_ref(), &request).await,
            Err(err) => {
                phase.advance(CallPhase::Failed);
                Err(err)
            }
        };

        result
            .map(ImageOutcome::into_url)
            .map_err(|err| err.with_context(Self::context("generate_image", call_id, None)))
    }

    fn history(&self) -> Vec<Message> {
        self.history.snapshot()
    }

    fn add_to_history(&self, message: Message) {
        self.history.append(message);
    }

    fn clear_history(&self) {
        self.history.clear();
    }
}
