//! Reqwest-based transport adapter.
//!
//! Production implementation of the [`Transport`] trait.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{classify_reqwest_error, TransportError};
use crate::sse::LineBuffer;
use crate::traits::{HttpMethod, HttpRequest, LineStream, Transport};

/// Transport implementation using reqwest.
///
/// Single-shot requests are bounded by the configured timeout as a whole.
/// Streaming requests only bound the connect phase, since a healthy stream
/// may stay open for a long time.
///
/// # Example
///
/// ```ignore
/// use chatkit::adapters::ReqwestTransport;
/// use std::time::Duration;
///
/// let transport = ReqwestTransport::new(Duration::from_secs(30));
/// let body = transport.perform_request(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the given timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default reqwest client: {}", e);
                reqwest::Client::new()
            });
        Self { client, timeout }
    }

    /// Create a transport around a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn build(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url).body(request.body.clone()),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        builder
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, TransportError> {
        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::http_status(status, message));
        }

        Ok(response)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform_request(&self, request: &HttpRequest) -> Result<Bytes, TransportError> {
        tracing::debug!("{} {}", request.method.as_str(), request.url);
        let builder = self.build(request).timeout(self.timeout);
        let response = self.send(builder).await?;
        response.bytes().await.map_err(|e| classify_reqwest_error(&e))
    }

    async fn perform_stream_request(
        &self,
        request: &HttpRequest,
    ) -> Result<LineStream, TransportError> {
        tracing::debug!("{} {} (stream)", request.method.as_str(), request.url);
        let builder = self
            .build(request)
            .header("Accept", "text/event-stream");
        let response = self.send(builder).await?;

        let bytes_stream = response.bytes_stream();

        // Split the body into complete lines; a chunk may hold several lines
        // or only part of one.
        let lines = stream::unfold(
            (bytes_stream, LineBuffer::new(), VecDeque::new(), false),
            |(mut bytes_stream, mut buffer, mut ready, mut done)| async move {
                loop {
                    if let Some(line) = ready.pop_front() {
                        return Some((Ok(line), (bytes_stream, buffer, ready, done)));
                    }
                    if done {
                        return None;
                    }

                    match bytes_stream.next().await {
                        Some(Ok(chunk)) => ready.extend(buffer.push(&chunk)),
                        Some(Err(e)) => {
                            done = true;
                            let err = classify_reqwest_error(&e);
                            return Some((Err(err), (bytes_stream, buffer, ready, done)));
                        }
                        None => {
                            done = true;
                            ready.extend(buffer.finish());
                        }
                    }
                }
            },
        );

        Ok(Box::pin(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Headers;

    #[test]
    fn test_reqwest_transport_default() {
        let transport = ReqwestTransport::default();
        let _ = transport.inner();
        assert_eq!(transport.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_build_applies_headers() {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer token".to_string());
        let request = HttpRequest::post("https://example.com/role/chat", headers, "{}");

        let transport = ReqwestTransport::default();
        let built = transport.build(&request).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "Bearer token"
        );
    }

    #[tokio::test]
    async fn test_perform_request_connection_refused() {
        let transport = ReqwestTransport::new(Duration::from_secs(2));
        let request = HttpRequest::post("http://127.0.0.1:59999/role/chat", Headers::new(), "{}");
        let result = transport.perform_request(&request).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_perform_stream_request_connection_refused() {
        let transport = ReqwestTransport::new(Duration::from_secs(2));
        let request = HttpRequest::post("http://127.0.0.1:59999/role/chat", Headers::new(), "{}");
        assert!(transport.perform_stream_request(&request).await.is_err());
    }
}
