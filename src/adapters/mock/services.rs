//! Mock service implementations.
//!
//! Canned answers with no transport underneath. Each mock can be told to fail
//! every call with [`ApiError::Simulated`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::chat::{ChatOptions, ChatStream, StreamEvent};
use crate::error::{ApiError, ApiResult, TransportError};
use crate::history::HistoryStore;
use crate::models::{ChatApiResponse, ChatResponseData, Message, SpeechAudio};
use crate::traits::{ChatService, HomeService, SpeechService};

fn default_responses() -> Vec<String> {
    vec![
        "Hello! This is a mock response.".to_string(),
        "I'm a mock AI assistant.".to_string(),
    ]
}

/// Chat service answering from a fixed list of replies, round-robin.
///
/// Streaming answers are split into words; each partial is one word followed
/// by a space.
#[derive(Debug)]
pub struct MockChatService {
    responses: Vec<String>,
    next: AtomicUsize,
    delay: Duration,
    should_error: bool,
    history: HistoryStore,
}

impl Default for MockChatService {
    fn default() -> Self {
        Self::new(default_responses())
    }
}

impl MockChatService {
    /// An empty list falls back to the built-in replies.
    pub fn new(responses: Vec<String>) -> Self {
        let responses = if responses.is_empty() {
            default_responses()
        } else {
            responses
        };
        Self {
            responses,
            next: AtomicUsize::new(0),
            delay: Duration::ZERO,
            should_error: false,
            history: HistoryStore::new(),
        }
    }

    /// Delay before each reply and between streamed words.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail every call with [`ApiError::Simulated`].
    pub fn with_error(mut self, should_error: bool) -> Self {
        self.should_error = should_error;
        self
    }

    fn next_response(&self) -> String {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.responses[index % self.responses.len()].clone()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn send_message(
        &self,
        message: Message,
        _options: &ChatOptions,
    ) -> ApiResult<ChatApiResponse> {
        self.pause().await;
        if self.should_error {
            return Err(ApiError::Simulated);
        }

        let content = self.next_response();
        self.history
            .extend([message, Message::assistant(content.clone())]);

        Ok(ChatApiResponse {
            code: 200,
            msg: "success".to_string(),
            data: ChatResponseData {
                role: "assistant".to_string(),
                content,
                kind: 0,
            },
        })
    }

    /// The whole exchange is recorded in history when the call starts.
    async fn send_stream_message(
        &self,
        message: Message,
        _options: &ChatOptions,
    ) -> ApiResult<ChatStream> {
        if self.should_error {
            return Err(ApiError::Simulated);
        }

        let content = self.next_response();
        let final_message = Message::assistant(content.clone());
        self.history.extend([message, final_message.clone()]);

        let mut events: Vec<StreamEvent> = content
            .split(' ')
            .map(|word| StreamEvent::Partial(format!("{} ", word)))
            .collect();
        events.push(StreamEvent::Completed(final_message));

        Ok(ChatStream::from_events(events, 8, self.delay))
    }

    async fn generate_image(&self, _prompt: &str, _locale: &str) -> ApiResult<Option<String>> {
        self.pause().await;
        if self.should_error {
            return Err(ApiError::Simulated);
        }
        Ok(Some(format!(
            "https://mock-image-url.com/generated-image-{}.jpg",
            Uuid::new_v4()
        )))
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

/// Speech service returning fixed audio bytes.
#[derive(Debug, Clone)]
pub struct MockSpeechService {
    audio: Bytes,
    delay: Duration,
    should_error: bool,
}

impl Default for MockSpeechService {
    fn default() -> Self {
        Self::new(Bytes::from(vec![0u8; 1000]))
    }
}

impl MockSpeechService {
    pub fn new(audio: Bytes) -> Self {
        Self {
            audio,
            delay: Duration::ZERO,
            should_error: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_error(mut self, should_error: bool) -> Self {
        self.should_error = should_error;
        self
    }
}

#[async_trait]
impl SpeechService for MockSpeechService {
    async fn text_to_speech(&self, _text: &str, _role_id: &str) -> ApiResult<SpeechAudio> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.should_error {
            return Err(ApiError::Simulated);
        }
        SpeechAudio::from_bytes(&self.audio)
            .map_err(|e| ApiError::from(TransportError::Io(e.to_string())))
    }
}

/// Home service returning a fixed body.
#[derive(Debug, Clone)]
pub struct MockHomeService {
    body: Bytes,
    delay: Duration,
    should_error: bool,
}

impl Default for MockHomeService {
    fn default() -> Self {
        let body = serde_json::json!({
            "recommendations": [
                { "id": "1", "title": "Mock Recommendation 1", "category": "tech" },
                { "id": "2", "title": "Mock Recommendation 2", "category": "news" }
            ],
            "featured": [
                { "id": "f1", "title": "Featured Content", "priority": "high" }
            ]
        });
        Self::new(Bytes::from(body.to_string()))
    }
}

impl MockHomeService {
    pub fn new(body: Bytes) -> Self {
        Self {
            body,
            delay: Duration::ZERO,
            should_error: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_error(mut self, should_error: bool) -> Self {
        self.should_error = should_error;
        self
    }
}

#[async_trait]
impl HomeService for MockHomeService {
    async fn fetch_home_data(&self, _locale: &str) -> ApiResult<Bytes> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.should_error {
            return Err(ApiError::Simulated);
        }
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_round_robin_replies() {
        let service = MockChatService::new(vec!["one".to_string(), "two".to_string()]);
        let options = ChatOptions::default();

        let mut replies = Vec::new();
        for _ in 0..3 {
            let response = service.send_message(Message::user("q"), &options).await.unwrap();
            replies.push(response.data.content);
        }

        assert_eq!(replies, vec!["one", "two", "one"]);
        assert_eq!(service.history().len(), 6);
    }

    #[tokio::test]
    async fn test_stream_splits_words() {
        let service = MockChatService::new(vec!["Hello mock world".to_string()]);
        let stream = service
            .send_stream_message(Message::user("q"), &ChatOptions::default())
            .await
            .unwrap();

        let events: Vec<_> = stream.collect().await;
        let partials: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                StreamEvent::Partial(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(partials, vec!["Hello ", "mock ", "world "]);
        assert!(matches!(
            events.last(),
            Some(StreamEvent::Completed(m)) if m.content == "Hello mock world"
        ));
    }

    #[tokio::test]
    async fn test_simulated_errors() {
        let chat = MockChatService::default().with_error(true);
        let err = chat
            .send_message(Message::user("q"), &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Simulated));
        assert_eq!(err.to_string(), "Simulated error for testing");
        assert!(chat.history().is_empty());

        let speech = MockSpeechService::default().with_error(true);
        assert!(speech.text_to_speech("x", "default").await.is_err());

        let home = MockHomeService::default().with_error(true);
        assert!(home.fetch_home_data("en").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_image_url() {
        let chat = MockChatService::default();
        let url = chat.generate_image("cat", "en").await.unwrap().unwrap();
        assert!(url.starts_with("https://mock-image-url.com/generated-image-"));
    }

    #[tokio::test]
    async fn test_mock_home_default_body() {
        let body = MockHomeService::default().fetch_home_data("en").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["featured"][0]["id"], "f1");
    }

    #[tokio::test]
    async fn test_mock_speech_audio() {
        let audio = MockSpeechService::default()
            .text_to_speech("x", "default")
            .await
            .unwrap();
        assert_eq!(audio.len(), 1000);
    }
}
