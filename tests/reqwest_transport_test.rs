//! ReqwestTransport against a local wiremock server.

use std::time::Duration;

use chatkit::adapters::ReqwestTransport;
use chatkit::error::TransportError;
use chatkit::traits::{Headers, HttpRequest, Transport};
use futures::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post(server: &MockServer, route: &str, body: &str) -> HttpRequest {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Authorization".to_string(), "Bearer test".to_string());
    HttpRequest::post(format!("{}{}", server.uri(), route), headers, body)
}

#[tokio::test]
async fn test_perform_request_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/home/rec"))
        .and(header("Authorization", "Bearer test"))
        .and(body_json(serde_json::json!({ "local": "en" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\":[]}"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::default();
    let body = transport
        .perform_request(&post(&server, "/home/rec", r#"{"local":"en"}"#))
        .await
        .unwrap();

    assert_eq!(&body[..], b"{\"items\":[]}");
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/role/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::default();
    let err = transport
        .perform_request(&post(&server, "/role/chat", "{}"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::HttpStatus {
            status: 503,
            message: "overloaded".to_string()
        }
    );

    let err = transport
        .perform_stream_request(&post(&server, "/role/chat", "{}"))
        .await
        .err()
        .unwrap();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_stream_yields_complete_lines() {
    let server = MockServer::start().await;
    let body = "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\r\n\
                \r\n\
                data: {\"choices\":[{\"delta\":{\"content\":\" there!\"}}]}\n\
                data: [DONE]";
    Mock::given(method("POST"))
        .and(path("/role/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::default();
    let lines: Vec<String> = transport
        .perform_stream_request(&post(&server, "/role/chat", "{}"))
        .await
        .unwrap()
        .map(|line| line.unwrap())
        .collect()
        .await;

    assert_eq!(
        lines,
        vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}",
            "",
            "data: {\"choices\":[{\"delta\":{\"content\":\" there!\"}}]}",
            "data: [DONE]",
        ]
    );
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/role/chat"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(Duration::from_millis(100));
    let err = transport
        .perform_request(&post(&server, "/role/chat", "{}"))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}

#[tokio::test]
async fn test_stream_skips_line_with_invalid_utf8() {
    let server = MockServer::start().await;
    let mut body = b"data: {\"choices\":[{\"delta\":{\"content\":\"a".to_vec();
    body.push(0xFF);
    body.extend_from_slice(b"b\"}}]}\ndata: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\ndata: [DONE]\n");
    Mock::given(method("POST"))
        .and(path("/role/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/event-stream")
                .set_body_bytes(body),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::default();
    let lines: Vec<String> = transport
        .perform_stream_request(&post(&server, "/role/chat", "{}"))
        .await
        .unwrap()
        .map(|line| line.unwrap())
        .collect()
        .await;

    assert_eq!(
        lines,
        vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}",
            "data: [DONE]",
        ]
    );
}

#[tokio::test]
async fn test_body_cut_mid_stream_is_io_error() {
    // Promises more body than it sends, then hangs up.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Content-Length: 500\r\n\r\n\
                  data: [DONE]\n",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let transport = ReqwestTransport::default();
    let request = HttpRequest::post(format!("http://{}/role/chat", addr), Headers::new(), "{}");
    let items: Vec<_> = transport
        .perform_stream_request(&request)
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 2, "got {:?}", items);
    assert_eq!(items[0], Ok("data: [DONE]".to_string()));
    assert!(
        matches!(items[1], Err(TransportError::Io(_))),
        "expected io error, got {:?}",
        items[1]
    );
}
