//! Image stage aggregation

use crate::sse::{SseFrame, StreamDelta};

/// What a single frame meant for an image session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageProgress {
    /// Nothing of interest in this frame
    Pending,
    /// The backend reported a new stage
    Stage(String),
    /// First non-empty image URL; the session is answered
    Ready(String),
    /// Terminal sentinel with no image
    Ended,
}

/// Final result of an image session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Image(String),
    /// The stream ended without producing an image. Not an error.
    NoResult,
}

impl ImageOutcome {
    pub fn into_url(self) -> Option<String> {
        match self {
            ImageOutcome::Image(url) => Some(url),
            ImageOutcome::NoResult => None,
        }
    }
}

/// Tracks one image generation stream.
///
/// Fires once: the first non-empty image URL completes the session and any
/// later frame is ignored.
#[derive(Debug, Default)]
pub struct ImageAggregator {
    stages: Vec<String>,
    image: Option<String>,
    ended: bool,
}

impl ImageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: &SseFrame) -> ImageProgress {
        if self.is_complete() {
            return ImageProgress::Pending;
        }
        match frame {
            SseFrame::Terminal => {
                self.ended = true;
                ImageProgress::Ended
            }
            SseFrame::Delta(delta) => self.push_delta(delta),
        }
    }

    fn push_delta(&mut self, delta: &StreamDelta) -> ImageProgress {
        if let Some(url) = delta.non_empty_image() {
            self.image = Some(url.to_string());
            return ImageProgress::Ready(url.to_string());
        }

        match delta.image_stage.as_deref().filter(|s| !s.is_empty()) {
            Some(stage) => {
                self.stages.push(stage.to_string());
                ImageProgress::Stage(stage.to_string())
            }
            None => ImageProgress::Pending,
        }
    }

    /// Whether the session is answered or the stream has ended.
    pub fn is_complete(&self) -> bool {
        self.image.is_some() || self.ended
    }

    /// Stages reported so far, in arrival order.
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn outcome(&self) -> ImageOutcome {
        match &self.image {
            Some(url) => ImageOutcome::Image(url.clone()),
            None => ImageOutcome::NoResult,
        }
    }
}
