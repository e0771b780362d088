//! Streaming encoder port interfaces (compressed export path)

use thiserror::Error;

use super::source::StreamSpec;
use crate::domain::audio::{AudioBlock, EncodedChunk};

/// Encoder errors
#[derive(Debug, Clone, Error)]
pub enum EncoderError {
    #[error("No usable encoder available: {0}")]
    Unavailable(String),

    #[error("Encoding failed: {0}")]
    EncodeFailed(String),
}

/// Port for an external streaming encoder.
///
/// The codec and container are the adapter's business; the pipeline only
/// requires opaque chunks tagged with a usable MIME type. Chunks may be
/// emitted at any cadence: per fed block, batched, or entirely at finish
/// time (the shipped FLAC adapter does the latter).
pub trait StreamingEncoder: Send {
    /// MIME type of the emitted chunks
    fn mime_type(&self) -> &str;

    /// Feed one raw block; returns any chunks that became ready
    fn feed(&mut self, block: &AudioBlock) -> Result<Vec<EncodedChunk>, EncoderError>;

    /// Stop consuming input until resumed. Fed blocks are ignored while
    /// paused, so pausing leaves no gap-filling garbage in the output.
    fn pause(&mut self);

    /// Resume consuming input
    fn resume(&mut self);

    /// Flush: encode whatever is pending and emit the final chunks
    fn finish(&mut self) -> Result<Vec<EncodedChunk>, EncoderError>;
}

/// Port for constructing a streaming encoder for a negotiated stream.
///
/// Implementations must fall back to their default configuration when a
/// tuned one cannot be constructed, and only then report `Unavailable`.
pub trait EncoderFactory: Send + Sync {
    fn create(&self, spec: StreamSpec) -> Result<Box<dyn StreamingEncoder>, EncoderError>;
}
