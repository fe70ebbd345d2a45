//! Stream aggregation.
//!
//! Aggregators consume decoded frames for one call and decide what to emit.
//! They hold no I/O and are never shared between calls.

mod image;
mod text;

pub use image::{ImageAggregator, ImageOutcome, ImageProgress};
pub use text::StreamAggregator;
