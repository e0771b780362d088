//! Active capture path port interfaces

use thiserror::Error;

use super::encoder::EncoderError;
use super::source::StreamSpec;
use crate::domain::audio::AudioBlock;

/// Which capture path a session records through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Raw sample buffering, finalized into a PCM WAV file
    #[default]
    Pcm,
    /// External streaming encoder, finalized by chunk concatenation
    Compressed,
}

/// Finalize errors
#[derive(Debug, Clone, Error)]
pub enum FinalizeError {
    /// Distinct "no audio captured" signal; never a corrupt artifact
    #[error("No audio captured")]
    Empty,

    #[error(transparent)]
    Encoder(#[from] EncoderError),
}

/// One live capture path.
///
/// The session state machine is written once against this interface and is
/// ignorant of which variant is active: the PCM path buffers raw blocks and
/// encodes WAV at finalize; the compressed path feeds an external encoder
/// and concatenates its chunks.
pub trait ActiveCapture: Send {
    /// Accept one block, in arrival order. Only called while recording.
    fn deliver(&mut self, block: AudioBlock) -> Result<(), EncoderError>;

    /// Suspend the path (encoder pause on the compressed variant)
    fn pause(&mut self);

    /// Resume the path
    fn resume(&mut self);

    /// Consume the path into the artifact payload: encoded bytes plus
    /// their MIME type. Once this begins the path is gone; nothing can be
    /// delivered to it anymore.
    fn finalize(self: Box<Self>) -> Result<(Vec<u8>, String), FinalizeError>;
}

/// Port for constructing the capture path for a session's mode and
/// negotiated stream parameters
pub trait CaptureFactory: Send + Sync {
    fn create(
        &self,
        mode: CaptureMode,
        spec: StreamSpec,
    ) -> Result<Box<dyn ActiveCapture>, EncoderError>;
}
