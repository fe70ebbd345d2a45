//! Line-oriented frame decoding
//!
//! Every event is one line. Lines beginning with the six characters `data: `
//! carry a payload; everything else is ignored. A payload of exactly `[DONE]`
//! ends the stream.

mod chat;
mod image;

use crate::error::DecodeError;
use crate::sse::events::{EnvelopeKind, SseFrame};

use chat::parse_chat_payload;
use image::parse_image_payload;

/// Prefix marking a payload-bearing line
pub const DATA_PREFIX: &str = "data: ";

/// Payload that terminates a stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Classification of a raw line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// Payload following the `data: ` prefix
    Data(&'a str),
    /// Anything else (comments, `event:` lines, blank lines)
    Ignored,
}

/// Strip the line terminator and split off the `data: ` prefix.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => SseLine::Data(payload),
        None => SseLine::Ignored,
    }
}

/// Decode one line into a frame.
///
/// Returns:
/// - `None` - line carries no payload
/// - `Some(Ok(SseFrame::Terminal))` - the `[DONE]` sentinel (no JSON parse)
/// - `Some(Ok(SseFrame::Delta(..)))` - a decoded envelope
/// - `Some(Err(..))` - malformed payload; only this line is affected
pub fn decode_line(line: &str, kind: EnvelopeKind) -> Option<Result<SseFrame, DecodeError>> {
    let SseLine::Data(payload) = parse_sse_line(line) else {
        return None;
    };

    if payload == DONE_SENTINEL {
        return Some(Ok(SseFrame::Terminal));
    }

    let parsed = match kind {
        EnvelopeKind::Chat => parse_chat_payload(payload),
        EnvelopeKind::Image => parse_image_payload(payload),
    };

    Some(
        parsed
            .map(SseFrame::Delta)
            .map_err(|e| DecodeError::malformed(line.trim_end_matches(['\n', '\r']), &e)),
    )
}

/// Per-stream decoder.
///
/// Stateless per line, except that once the terminal sentinel has been seen
/// every further line is dropped without inspection.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    kind: EnvelopeKind,
    terminated: bool,
}

impl FrameDecoder {
    pub fn new(kind: EnvelopeKind) -> Self {
        Self {
            kind,
            terminated: false,
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        self.kind
    }

    /// Whether the terminal sentinel has been decoded.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Feed one complete line.
    pub fn feed_line(&mut self, line: &str) -> Option<Result<SseFrame, DecodeError>> {
        if self.terminated {
            return None;
        }

        let outcome = decode_line(line, self.kind);
        if let Some(Ok(SseFrame::Terminal)) = outcome {
            self.terminated = true;
        }
        outcome
    }

    /// Lazily decode an iterator of lines.
    ///
    /// The returned iterator stops after the terminal frame.
    pub fn frames<I>(self, lines: I) -> Frames<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Frames {
            decoder: self,
            lines: lines.into_iter(),
        }
    }
}

/// Iterator returned by [`FrameDecoder::frames`]
#[derive(Debug)]
pub struct Frames<I> {
    decoder: FrameDecoder,
    lines: I,
}

impl<I> Iterator for Frames<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<SseFrame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.decoder.is_terminated() {
            let line = self.lines.next()?;
            if let Some(outcome) = self.decoder.feed_line(line.as_ref()) {
                return Some(outcome);
            }
        }
        None
    }
}
