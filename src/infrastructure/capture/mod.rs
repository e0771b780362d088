//! Capture path implementations
//!
//! The two variants behind the `ActiveCapture` port: raw PCM buffering
//! finalized into a WAV file, and streaming-encoder output finalized by
//! chunk concatenation.

use crate::application::ports::{
    ActiveCapture, CaptureFactory, CaptureMode, EncoderError, EncoderFactory, FinalizeError,
    StreamSpec, StreamingEncoder,
};
use crate::domain::audio::{AudioBlock, ChunkBuffer, SampleBuffer, WAV_MIME};

use super::encoding::wav::encode_wav;

/// Raw sample path: blocks accumulate untouched and become a WAV file at
/// finalize.
pub struct PcmCapture {
    spec: StreamSpec,
    buffer: SampleBuffer,
}

impl PcmCapture {
    pub fn new(spec: StreamSpec) -> Self {
        Self {
            spec,
            buffer: SampleBuffer::new(),
        }
    }
}

impl ActiveCapture for PcmCapture {
    fn deliver(&mut self, block: AudioBlock) -> Result<(), EncoderError> {
        self.buffer.push(block);
        Ok(())
    }

    // Pause is handled at the stream gate; there is nothing to suspend here
    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn finalize(self: Box<Self>) -> Result<(Vec<u8>, String), FinalizeError> {
        let samples = self.buffer.flatten().ok_or(FinalizeError::Empty)?;
        let bytes = encode_wav(&samples, self.spec.sample_rate, self.spec.channels)
            .map_err(|e| EncoderError::EncodeFailed(e.to_string()))?;
        Ok((bytes, WAV_MIME.to_string()))
    }
}

/// Compressed path: blocks feed the external encoder, whose opaque chunks
/// accumulate until finalize concatenates them.
pub struct EncodedCapture {
    encoder: Box<dyn StreamingEncoder>,
    buffer: ChunkBuffer,
}

impl EncodedCapture {
    pub fn new(encoder: Box<dyn StreamingEncoder>) -> Self {
        Self {
            encoder,
            buffer: ChunkBuffer::new(),
        }
    }
}

impl ActiveCapture for EncodedCapture {
    fn deliver(&mut self, block: AudioBlock) -> Result<(), EncoderError> {
        for chunk in self.encoder.feed(&block)? {
            self.buffer.push(chunk);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.encoder.pause();
    }

    fn resume(&mut self) {
        self.encoder.resume();
    }

    fn finalize(mut self: Box<Self>) -> Result<(Vec<u8>, String), FinalizeError> {
        for chunk in self.encoder.finish()? {
            self.buffer.push(chunk);
        }
        self.buffer.finalize().ok_or(FinalizeError::Empty)
    }
}

/// Default capture factory: PCM buffering, or a streaming encoder from the
/// given encoder factory for compressed mode.
pub struct DefaultCaptureFactory<E: EncoderFactory> {
    encoders: E,
}

impl<E: EncoderFactory> DefaultCaptureFactory<E> {
    pub fn new(encoders: E) -> Self {
        Self { encoders }
    }
}

impl<E: EncoderFactory> CaptureFactory for DefaultCaptureFactory<E> {
    fn create(
        &self,
        mode: CaptureMode,
        spec: StreamSpec,
    ) -> Result<Box<dyn ActiveCapture>, EncoderError> {
        match mode {
            CaptureMode::Pcm => Ok(Box::new(PcmCapture::new(spec))),
            CaptureMode::Compressed => {
                let encoder = self.encoders.create(spec)?;
                Ok(Box::new(EncodedCapture::new(encoder)))
            }
        }
    }
}
