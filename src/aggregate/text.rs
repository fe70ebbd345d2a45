//! Text delta aggregation

use crate::models::Message;
use crate::sse::{SseFrame, StreamDelta};

/// Accumulates assistant text for one streaming call.
///
/// Fragments are returned for partial emission in the order they are pushed.
/// The final message can be taken exactly once, however many times the stream
/// reports that it ended.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    content: String,
    fragments: usize,
    terminal_seen: bool,
    finalized: bool,
    finish_reason: Option<String>,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame.
    ///
    /// Returns the text fragment to emit as a partial result, if the frame
    /// carried a non-empty one.
    pub fn push(&mut self, frame: &SseFrame) -> Option<String> {
        match frame {
            SseFrame::Delta(delta) => self.push_delta(delta),
            SseFrame::Terminal => {
                self.terminal_seen = true;
                None
            }
        }
    }

    /// Process one delta.
    pub fn push_delta(&mut self, delta: &StreamDelta) -> Option<String> {
        if self.finalized {
            return None;
        }
        if let Some(reason) = &delta.finish_reason {
            self.finish_reason = Some(reason.clone());
        }

        let fragment = delta.non_empty_text()?;
        self.content.push_str(fragment);
        self.fragments += 1;
        Some(fragment.to_string())
    }

    /// Text accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of non-empty fragments accumulated.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Whether a terminal frame has been pushed.
    pub fn terminal_seen(&self) -> bool {
        self.terminal_seen
    }

    /// Last finish reason reported by the backend.
    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    /// Whether [`finish`](Self::finish) has already produced the final message.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Produce the final assistant message.
    ///
    /// Returns `Some` on the first call only. The content may be empty: an
    /// empty answer is still a completed answer.
    pub fn finish(&mut self) -> Option<Message> {
        if self.finalized {
            return None;
        }
        self.finalized = true;
        Some(Message::assistant(self.content.clone()))
    }
}
