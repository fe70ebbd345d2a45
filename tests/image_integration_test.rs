//! Image generation sessions over a mock transport.

mod common;

use chatkit::adapters::mock::{MockResponse, MockTransport};
use chatkit::models::ImageRequest;
use chatkit::traits::ChatService;
use common::*;

fn image_transport(lines: Vec<String>) -> MockTransport {
    let transport = MockTransport::new();
    transport.set_response(&image_url(), MockResponse::Lines(lines));
    transport
}

#[tokio::test]
async fn test_first_image_url_wins() {
    let transport = image_transport(vec![
        image_chunk(Some("queued"), None),
        image_chunk(Some("rendering"), None),
        image_chunk(None, Some("https://cdn.test/first.png")),
        image_chunk(None, Some("https://cdn.test/second.png")),
        done(),
    ]);
    let service = chat_service(&transport);

    let url = service.generate_image("a lighthouse", "en").await.unwrap();

    assert_eq!(url.as_deref(), Some("https://cdn.test/first.png"));
    assert_eq!(transport.open_streams(), 0);
}

#[tokio::test]
async fn test_stages_then_done_yields_none() {
    let transport = image_transport(vec![
        image_chunk(Some("queued"), None),
        image_chunk(Some("rendering"), None),
        done(),
    ]);
    let service = chat_service(&transport);

    assert_eq!(service.generate_image("a lighthouse", "en").await.unwrap(), None);
}

#[tokio::test]
async fn test_empty_image_is_not_a_result() {
    let transport = image_transport(vec![
        image_chunk(None, Some("")),
        image_chunk(None, Some("https://cdn.test/real.png")),
    ]);
    let service = chat_service(&transport);

    assert_eq!(
        service.generate_image("x", "en").await.unwrap().as_deref(),
        Some("https://cdn.test/real.png")
    );
}

#[tokio::test]
async fn test_image_request_body() {
    let transport = image_transport(vec![done()]);
    let service = chat_service(&transport);

    service.generate_image("a red fox", "de").await.unwrap();

    let sent: ImageRequest = transport.get_requests()[0].json().unwrap();
    assert_eq!(sent.prompt, "a red fox");
    assert_eq!(sent.locale, "de");
    assert!(service.history().is_empty());
}
