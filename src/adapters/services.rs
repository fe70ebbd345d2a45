//! Transport-backed speech and home services.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult, ErrorContext, ResultExt, TransportError};
use crate::models::SpeechAudio;
use crate::request::{build_home_request, build_speech_request, RequestBuilder};
use crate::traits::{HomeService, SpeechService, Transport};

/// Speech service posting to the text-to-speech endpoint.
pub struct DefaultSpeechService {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
}

impl DefaultSpeechService {
    pub fn new(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        Self {
            transport,
            builder: RequestBuilder::new(config),
        }
    }
}

#[async_trait]
impl SpeechService for DefaultSpeechService {
    async fn text_to_speech(&self, text: &str, role_id: &str) -> ApiResult<SpeechAudio> {
        let request = self.builder.speech(&build_speech_request(text, role_id))?;
        let body = self
            .transport
            .perform_request(&request)
            .await
            .with_context(|| ErrorContext::new("text_to_speech"))?;

        tracing::debug!(bytes = body.len(), "Speech audio received");
        SpeechAudio::from_bytes(&body).map_err(|e| {
            ApiError::from(TransportError::Io(e.to_string()))
                .with_context(ErrorContext::new("text_to_speech"))
        })
    }
}

/// Home service posting to the recommendations endpoint.
pub struct DefaultHomeService {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
}

impl DefaultHomeService {
    pub fn new(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        Self {
            transport,
            builder: RequestBuilder::new(config),
        }
    }
}

#[async_trait]
impl HomeService for DefaultHomeService {
    async fn fetch_home_data(&self, locale: &str) -> ApiResult<Bytes> {
        let request = self.builder.home(&build_home_request(locale))?;
        self.transport
            .perform_request(&request)
            .await
            .with_context(|| ErrorContext::new("fetch_home_data"))
    }
}
