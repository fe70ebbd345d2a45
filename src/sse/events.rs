//! Decoded frame types
//!
//! A frame is either a delta carrying some incremental update, or the terminal
//! marker that ends the stream.

/// Which JSON envelope the `data: ` payloads of a stream use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeKind {
    /// `{ "choices": [ { "delta": { "content": ... } } ] }`
    #[default]
    Chat,
    /// `{ "data": { "stage": ..., "image": ... } }`
    Image,
}

/// One incremental update decoded from a single `data: ` line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamDelta {
    /// Piece of assistant text
    pub text_fragment: Option<String>,
    /// Progress stage reported by the image backend
    pub image_stage: Option<String>,
    /// URL of a generated image
    pub image_url: Option<String>,
    /// Finish reason of the first choice, when the backend sends one
    pub finish_reason: Option<String>,
    /// Role announced by the delta (usually only on the first chunk)
    pub role: Option<String>,
}

impl StreamDelta {
    /// Delta carrying only a text fragment.
    pub fn text(fragment: impl Into<String>) -> Self {
        Self {
            text_fragment: Some(fragment.into()),
            ..Default::default()
        }
    }

    /// Delta carrying only an image stage.
    pub fn stage(stage: impl Into<String>) -> Self {
        Self {
            image_stage: Some(stage.into()),
            ..Default::default()
        }
    }

    /// Delta carrying only an image URL.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// The text fragment, if present and non-empty.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text_fragment.as_deref().filter(|s| !s.is_empty())
    }

    /// The image URL, if present and non-empty.
    pub fn non_empty_image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|s| !s.is_empty())
    }
}

/// A single decoded event unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Data-bearing frame
    Delta(StreamDelta),
    /// The `[DONE]` sentinel
    Terminal,
}

impl SseFrame {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SseFrame::Terminal)
    }

    /// The delta, for data-bearing frames.
    pub fn delta(&self) -> Option<&StreamDelta> {
        match self {
            SseFrame::Delta(delta) => Some(delta),
            SseFrame::Terminal => None,
        }
    }
}
