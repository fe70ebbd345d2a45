//! Mock transport for testing.
//!
//! Returns scripted bodies, line streams or errors per URL and records every
//! request it receives.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::TransportError;
use crate::traits::{HttpRequest, LineStream, Transport};

/// Scripted outcome for a URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful single-shot body
    Body(Bytes),
    /// Successful streaming response, one entry per line
    Lines(Vec<String>),
    /// Lines followed by a mid-stream failure
    LinesThenError(Vec<String>, TransportError),
    /// Fail before any response
    Error(TransportError),
}

impl MockResponse {
    /// Streaming response built from string slices.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Single-shot JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        MockResponse::Body(Bytes::from(value.to_string()))
    }
}

/// Mock transport for testing.
///
/// Clones share configuration and recorded requests.
///
/// # Example
///
/// ```ignore
/// use chatkit::adapters::mock::{MockResponse, MockTransport};
///
/// let transport = MockTransport::new();
/// transport.set_response(
///     "https://api.example.com/role/chat",
///     MockResponse::lines(["data: [DONE]"]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    line_delay: Arc<Mutex<Option<Duration>>>,
    open_streams: Arc<AtomicUsize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Decrements the open stream counter when the line stream is dropped.
struct StreamGuard(Arc<AtomicUsize>);

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL. Exact matches win over prefix matches.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set the response for URLs without a specific match.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Delay before each streamed line, to make cancellation observable.
    pub fn set_line_delay(&self, delay: Duration) {
        *lock(&self.line_delay) = Some(delay);
    }

    /// All recorded requests, in arrival order.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Number of line streams handed out and not yet dropped.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    fn record(&self, request: &HttpRequest) {
        lock(&self.requests).push(request.clone());
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        lock(&self.default_response).clone()
    }

    fn line_stream(
        &self,
        lines: Vec<String>,
        trailing_error: Option<TransportError>,
    ) -> LineStream {
        let items: Vec<Result<String, TransportError>> = lines
            .into_iter()
            .map(Ok)
            .chain(trailing_error.map(Err))
            .collect();

        self.open_streams.fetch_add(1, Ordering::SeqCst);
        let guard = StreamGuard(self.open_streams.clone());
        let delay = *lock(&self.line_delay);

        let stream = stream::unfold(
            (items.into_iter(), guard),
            move |(mut items, guard)| async move {
                let item = items.next()?;
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Some((item, (items, guard)))
            },
        );

        Box::pin(stream) as Pin<Box<_>>
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform_request(&self, request: &HttpRequest) -> Result<Bytes, TransportError> {
        self.record(request);

        match self.get_response(&request.url) {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Lines(lines)) => Ok(Bytes::from(lines.join("\n"))),
            Some(MockResponse::LinesThenError(_, err)) => Err(err),
            None => Err(TransportError::http_status(
                404,
                format!("No mock response for URL: {}", request.url),
            )),
        }
    }

    async fn perform_stream_request(
        &self,
        request: &HttpRequest,
    ) -> Result<LineStream, TransportError> {
        self.record(request);

        match self.get_response(&request.url) {
            Some(MockResponse::Lines(lines)) => Ok(self.line_stream(lines, None)),
            Some(MockResponse::LinesThenError(lines, err)) => {
                Ok(self.line_stream(lines, Some(err)))
            }
            Some(MockResponse::Body(body)) => {
                let text = String::from_utf8_lossy(&body).into_owned();
                Ok(self.line_stream(text.lines().map(str::to_string).collect(), None))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(TransportError::http_status(
                404,
                format!("No mock response for URL: {}", request.url),
            )),
        }
    }
}
