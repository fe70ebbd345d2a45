//! HTTP transport trait abstraction.
//!
//! The chat engine never talks to the network directly. It hands a fully
//! built [`HttpRequest`] to a [`Transport`] and gets back either a body or a
//! stream of complete text lines.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use crate::error::TransportError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Stream of complete lines (terminator removed) from a streaming response.
///
/// The stream ending is the success signal; an `Err` item is the failure
/// signal and is always the last item.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, TransportError>> + Send>>;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    /// JSON body
    pub body: String,
}

impl HttpRequest {
    /// Create a POST request with a JSON body.
    pub fn post(url: impl Into<String>, headers: Headers, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Trait for the HTTP collaborator.
///
/// Implementations include the production reqwest-based transport and a
/// scripted mock for tests.
///
/// # Example
///
/// ```ignore
/// use chatkit::traits::{HttpRequest, Transport};
///
/// async fn fetch<T: Transport>(transport: &T, req: &HttpRequest) -> Result<String, TransportError> {
///     let body = transport.perform_request(req).await?;
///     Ok(String::from_utf8_lossy(&body).into_owned())
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a request and return the whole body.
    ///
    /// Fails with [`TransportError::HttpStatus`] on non-2xx responses.
    async fn perform_request(&self, request: &HttpRequest) -> Result<Bytes, TransportError>;

    /// Perform a request whose response is streamed line by line.
    ///
    /// Status is checked before the stream is returned, so a non-2xx response
    /// fails here rather than inside the stream. Dropping the returned stream
    /// releases the connection.
    async fn perform_stream_request(
        &self,
        request: &HttpRequest,
    ) -> Result<LineStream, TransportError>;
}
