//! SSE-style line stream decoding
//!
//! The backend streams one event per line:
//! - `data: <json>` - event payload
//! - `data: [DONE]` - end of stream
//! - anything else - ignored
//!
//! # Module structure
//! - `events` - Frame types (SseFrame, StreamDelta, EnvelopeKind)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Line decoding (decode_line, FrameDecoder)
//! - `line_buffer` - Raw byte chunks to complete lines

mod events;
mod line_buffer;
mod parser;
mod payloads;

pub use events::{EnvelopeKind, SseFrame, StreamDelta};
pub use line_buffer::LineBuffer;
pub use parser::{
    decode_line, parse_sse_line, FrameDecoder, Frames, SseLine, DATA_PREFIX, DONE_SENTINEL,
};
