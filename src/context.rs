//! Service context.
//!
//! Holds the collaborators every outward operation needs. Built once with
//! [`ServiceContextBuilder`]; substitutes (mocks, custom transports) are passed
//! in explicitly rather than registered globally.

use std::sync::Arc;

use crate::adapters::mock::{MockChatService, MockHomeService, MockSpeechService};
use crate::adapters::{DefaultHomeService, DefaultSpeechService, ReqwestTransport};
use crate::chat::DefaultChatService;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::traits::{ChatService, HomeService, SpeechService, Transport};

/// Resolved set of services.
#[derive(Clone)]
pub struct ServiceContext {
    config: Option<ApiConfig>,
    chat: Arc<dyn ChatService>,
    speech: Arc<dyn SpeechService>,
    home: Arc<dyn HomeService>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    /// Production context configured from the environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::builder().with_config(ApiConfig::from_env()?).build()
    }

    /// Context backed entirely by mocks, replying from `responses`.
    pub fn mock(responses: Vec<String>) -> Self {
        Self {
            config: None,
            chat: Arc::new(MockChatService::new(responses)),
            speech: Arc::new(MockSpeechService::default()),
            home: Arc::new(MockHomeService::default()),
        }
    }

    /// Configuration, absent for fully mocked contexts.
    pub fn config(&self) -> Option<&ApiConfig> {
        self.config.as_ref()
    }

    pub fn chat(&self) -> Arc<dyn ChatService> {
        self.chat.clone()
    }

    pub fn speech(&self) -> Arc<dyn SpeechService> {
        self.speech.clone()
    }

    pub fn home(&self) -> Arc<dyn HomeService> {
        self.home.clone()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("base_url", &self.config.as_ref().map(|c| c.base_url.as_str()))
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceContext`].
///
/// Services not supplied explicitly are built over the transport, which
/// defaults to [`ReqwestTransport`]. Building any of them needs a config.
///
/// # Example
///
/// ```ignore
/// use chatkit::config::ApiConfig;
/// use chatkit::context::ServiceContext;
///
/// let context = ServiceContext::builder()
///     .with_config(ApiConfig::new("secret"))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServiceContextBuilder {
    config: Option<ApiConfig>,
    transport: Option<Arc<dyn Transport>>,
    chat: Option<Arc<dyn ChatService>>,
    speech: Option<Arc<dyn SpeechService>>,
    home: Option<Arc<dyn HomeService>>,
}

impl ServiceContextBuilder {
    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_chat_service(mut self, chat: Arc<dyn ChatService>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn with_speech_service(mut self, speech: Arc<dyn SpeechService>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_home_service(mut self, home: Arc<dyn HomeService>) -> Self {
        self.home = Some(home);
        self
    }

    /// Resolve every service.
    ///
    /// Fails with [`ApiError::ConfigurationMissing`] when a service has to be
    /// built and no config was given.
    pub fn build(self) -> ApiResult<ServiceContext> {
        let ServiceContextBuilder {
            config,
            transport,
            chat,
            speech,
            home,
        } = self;

        if let (Some(chat), Some(speech), Some(home)) = (&chat, &speech, &home) {
            return Ok(ServiceContext {
                config,
                chat: chat.clone(),
                speech: speech.clone(),
                home: home.clone(),
            });
        }

        let config = config.ok_or(ApiError::ConfigurationMissing("api config"))?;
        let transport = transport.unwrap_or_else(|| {
            tracing::debug!("Using reqwest transport for {}", config.base_url);
            Arc::new(ReqwestTransport::new(config.request_timeout))
        });

        let chat = chat.unwrap_or_else(|| {
            Arc::new(DefaultChatService::new(transport.clone(), config.clone()))
        });
        let speech = speech.unwrap_or_else(|| {
            Arc::new(DefaultSpeechService::new(transport.clone(), config.clone()))
        });
        let home = home.unwrap_or_else(|| {
            Arc::new(DefaultHomeService::new(transport.clone(), config.clone()))
        });

        Ok(ServiceContext {
            config: Some(config),
            chat,
            speech,
            home,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockTransport;
    use crate::chat::ChatOptions;
    use crate::models::Message;

    #[test]
    fn test_build_without_config_fails() {
        let err = ServiceContext::builder().build().unwrap_err();
        assert!(matches!(err, ApiError::ConfigurationMissing("api config")));
    }

    #[test]
    fn test_all_services_supplied_needs_no_config() {
        let context = ServiceContext::builder()
            .with_chat_service(Arc::new(MockChatService::default()))
            .with_speech_service(Arc::new(MockSpeechService::default()))
            .with_home_service(Arc::new(MockHomeService::default()))
            .build()
            .unwrap();
        assert!(context.config().is_none());
    }

    #[tokio::test]
    async fn test_transport_is_shared_by_services() {
        let transport = MockTransport::new();
        transport.set_default_response(crate::adapters::mock::MockResponse::json(
            &serde_json::json!({
                "code": 0, "msg": "ok",
                "data": { "role": "assistant", "content": "hey", "type": 0 }
            }),
        ));

        let context = ServiceContext::builder()
            .with_config(ApiConfig::new("key").with_base_url("https://api.test"))
            .with_transport(Arc::new(transport.clone()))
            .build()
            .unwrap();

        context
            .chat()
            .send_message(Message::user("hi"), &ChatOptions::default())
            .await
            .unwrap();
        context.home().fetch_home_data("en").await.unwrap();

        let urls: Vec<_> = transport.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://api.test/role/chat", "https://api.test/home/rec"]);
    }

    #[test]
    fn test_mock_context() {
        let context = ServiceContext::mock(vec!["a".to_string()]);
        assert!(context.config().is_none());
        assert!(context.chat().history().is_empty());
    }
}
