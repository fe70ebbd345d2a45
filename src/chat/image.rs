//! Image generation session.
//!
//! Runs the same line pipeline as a streaming chat call but with the image
//! envelope, and answers as soon as the first image URL arrives.

use futures_util::StreamExt;

use super::phase::{CallPhase, PhaseTracker};
use crate::aggregate::{ImageAggregator, ImageOutcome, ImageProgress};
use crate::error::ApiResult;
use crate::sse::{EnvelopeKind, FrameDecoder};
use crate::traits::{HttpRequest, Transport};

/// Drive one image generation request to its outcome.
///
/// Returning early drops the line stream, which releases the connection.
pub(crate) async fn run_image_session(
    mut phase: PhaseTracker,
    transport: &dyn Transport,
    request: &HttpRequest,
) -> ApiResult<ImageOutcome> {
    let call_id = phase.call_id();
    phase.advance(CallPhase::InFlight);

    let mut lines = match transport.perform_stream_request(request).await {
        Ok(lines) => lines,
        Err(err) => {
            phase.advance(CallPhase::Failed);
            return Err(err.into());
        }
    };

    phase.advance(CallPhase::Streaming);
    let mut decoder = FrameDecoder::new(EnvelopeKind::Image);
    let mut aggregator = ImageAggregator::new();

    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(call_id = %call_id, "Image stream aborted: {}", err);
                phase.advance(CallPhase::Failed);
                return Err(err.into());
            }
        };

        let frame = match decoder.feed_line(&line) {
            Some(Ok(frame)) => frame,
            Some(Err(err)) => {
                tracing::warn!(call_id = %call_id, "Skipping malformed image frame: {}", err);
                continue;
            }
            None => continue,
        };

        match aggregator.push(&frame) {
            ImageProgress::Stage(stage) => {
                tracing::debug!(call_id = %call_id, stage = %stage, "Image stage");
            }
            ImageProgress::Ready(url) => {
                tracing::info!(call_id = %call_id, stages = aggregator.stages().len(), "Image ready");
                phase.advance(CallPhase::Done);
                return Ok(ImageOutcome::Image(url));
            }
            ImageProgress::Ended => break,
            ImageProgress::Pending => {}
        }
    }

    phase.advance(CallPhase::Completing);
    let outcome = aggregator.outcome();
    if outcome == ImageOutcome::NoResult {
        tracing::info!(call_id = %call_id, "Image stream ended without an image");
    }
    phase.advance(CallPhase::Done);
    Ok(outcome)
}
