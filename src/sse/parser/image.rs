//! Image envelope parser

use crate::sse::events::StreamDelta;
use crate::sse::payloads::ImageEnvelope;

/// Parse an image generation chunk into a delta.
pub(super) fn parse_image_payload(data: &str) -> Result<StreamDelta, serde_json::Error> {
    let envelope: ImageEnvelope = serde_json::from_str(data)?;

    Ok(StreamDelta {
        image_stage: envelope.data.stage,
        image_url: envelope.data.image,
        ..Default::default()
    })
}
