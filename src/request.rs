//! Request construction.
//!
//! The `build_*` functions are pure: they copy their inputs into a payload and
//! touch nothing else. [`RequestBuilder`] pairs a payload with the configured
//! endpoint and headers to produce an [`HttpRequest`].

use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{ChatRequest, HomeRequest, ImageRequest, Message, SpeechRequest};
use crate::traits::HttpRequest;

pub const CHAT_PATH: &str = "/role/chat";
pub const IMAGE_PATH: &str = "/role/genImage";
pub const SPEECH_PATH: &str = "/role/textToSpeech";
pub const HOME_PATH: &str = "/home/rec";

/// Build a chat payload from a history slice.
///
/// The slice is copied, so later appends to the source history do not show
/// up in the request. An empty history is allowed.
pub fn build_chat_request(
    history: &[Message],
    model: &str,
    temperature: f64,
    stream: bool,
    role_id: &str,
) -> ChatRequest {
    ChatRequest {
        role_id: role_id.to_string(),
        model: model.to_string(),
        temperature,
        messages: history.to_vec(),
        stream,
    }
}

pub fn build_image_request(prompt: &str, locale: &str) -> ImageRequest {
    ImageRequest {
        locale: locale.to_string(),
        prompt: prompt.to_string(),
    }
}

pub fn build_speech_request(text: &str, role_id: &str) -> SpeechRequest {
    SpeechRequest {
        text: text.to_string(),
        role_id: role_id.to_string(),
    }
}

pub fn build_home_request(locale: &str) -> HomeRequest {
    HomeRequest {
        local: locale.to_string(),
    }
}

/// Turns payloads into HTTP requests against the configured backend.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ApiConfig,
}

impl RequestBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn post<T: Serialize>(&self, path: &str, payload: &T) -> ApiResult<HttpRequest> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::post(
            self.config.endpoint(path),
            self.config.headers(),
            body,
        ))
    }

    pub fn chat(&self, request: &ChatRequest) -> ApiResult<HttpRequest> {
        self.post(CHAT_PATH, request)
    }

    pub fn image(&self, request: &ImageRequest) -> ApiResult<HttpRequest> {
        self.post(IMAGE_PATH, request)
    }

    pub fn speech(&self, request: &SpeechRequest) -> ApiResult<HttpRequest> {
        self.post(SPEECH_PATH, request)
    }

    pub fn home(&self, request: &HomeRequest) -> ApiResult<HttpRequest> {
        self.post(HOME_PATH, request)
    }
}
