//! Common test utilities for integration tests.
//!
//! Builders for wire-format lines and services wired to a mock transport.

#![allow(dead_code)]

use std::sync::Arc;

use chatkit::adapters::mock::{MockResponse, MockTransport};
use chatkit::chat::{DefaultChatService, StreamEvent};
use chatkit::config::ApiConfig;
use chatkit::models::Message;

pub const BASE_URL: &str = "https://api.test";

pub fn chat_url() -> String {
    format!("{}/role/chat", BASE_URL)
}

pub fn image_url() -> String {
    format!("{}/role/genImage", BASE_URL)
}

pub fn test_config() -> ApiConfig {
    ApiConfig::new("test-api-key").with_base_url(BASE_URL)
}

/// `data: ` line carrying one chat content fragment.
pub fn chat_chunk(content: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
    )
}

/// `data: ` line carrying one image progress update.
pub fn image_chunk(stage: Option<&str>, image: Option<&str>) -> String {
    format!(
        "data: {}",
        serde_json::json!({ "data": { "stage": stage, "image": image } })
    )
}

pub fn done() -> String {
    "data: [DONE]".to_string()
}

/// Single-shot chat reply body.
pub fn reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "code": 0,
        "msg": "ok",
        "data": { "role": "assistant", "content": content, "type": 0 }
    })
}

/// Chat service over `transport` with the test config.
pub fn chat_service(transport: &MockTransport) -> DefaultChatService {
    DefaultChatService::new(Arc::new(transport.clone()), test_config())
}

/// Transport that streams `lines` for every chat request.
pub fn streaming_transport<I, S>(lines: I) -> MockTransport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let transport = MockTransport::new();
    transport.set_response(&chat_url(), MockResponse::lines(lines));
    transport
}

/// Split collected events into partial texts and the terminal event.
pub fn split_events(events: Vec<StreamEvent>) -> (Vec<String>, Option<StreamEvent>) {
    let mut partials = Vec::new();
    let mut terminal = None;
    for event in events {
        match event {
            StreamEvent::Partial(text) => partials.push(text),
            other if other.is_terminal() => terminal = Some(other),
            _ => {}
        }
    }
    (partials, terminal)
}

pub fn assistant(content: &str) -> Message {
    Message::assistant(content)
}
