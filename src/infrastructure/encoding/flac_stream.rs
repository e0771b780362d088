//! FLAC adapter for the compressed export path
//!
//! Wraps flacenc behind the streaming-encoder port. flacenc encodes a
//! complete stream in one pass, so this adapter accumulates quantized
//! samples while recording and flushes at finish time, emitting the
//! encoded stream split into bounded chunks.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use super::wav::pcm16_from_f32;
use crate::application::ports::{EncoderError, EncoderFactory, StreamSpec, StreamingEncoder};
use crate::domain::audio::{AudioBlock, EncodedChunk};

/// MIME type of the emitted chunks
pub const FLAC_MIME: &str = "audio/flac";

/// Bits per sample fed to the encoder (matches the WAV path quantization)
const BITS_PER_SAMPLE: usize = 16;

/// Preferred encoder block size, matched to the capture cadence
const PREFERRED_BLOCK_SIZE: usize = 4096;

/// Upper bound on emitted chunk size
const CHUNK_BYTES: usize = 64 * 1024;

/// Verify that an encoder configuration is constructible
fn verify_config(block_size: Option<usize>) -> Result<(), String> {
    let mut cfg = config::Encoder::default();
    if let Some(size) = block_size {
        cfg.block_size = size;
    }
    cfg.into_verified().map(|_| ()).map_err(|(_, e)| format!("{:?}", e))
}

/// Encode the accumulated stream in one pass
fn encode_flac(
    samples: &[i32],
    spec: StreamSpec,
    block_size: Option<usize>,
) -> Result<Vec<u8>, EncoderError> {
    let mut cfg = config::Encoder::default();
    if let Some(size) = block_size {
        cfg.block_size = size;
    }
    let cfg = cfg
        .into_verified()
        .map_err(|(_, e)| EncoderError::Unavailable(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        samples,
        spec.channels as usize,
        BITS_PER_SAMPLE,
        spec.sample_rate as usize,
    );

    let stream = flacenc::encode_with_fixed_block_size(&cfg, source, cfg.block_size)
        .map_err(|e| EncoderError::EncodeFailed(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| EncoderError::EncodeFailed(e.to_string()))?;

    Ok(sink.into_inner())
}

/// Streaming-encoder adapter over flacenc
pub struct FlacStreamEncoder {
    spec: StreamSpec,
    block_size: Option<usize>,
    samples: Vec<i32>,
    paused: bool,
}

impl FlacStreamEncoder {
    fn new(spec: StreamSpec, block_size: Option<usize>) -> Self {
        Self {
            spec,
            block_size,
            samples: Vec::new(),
            paused: false,
        }
    }
}

impl StreamingEncoder for FlacStreamEncoder {
    fn mime_type(&self) -> &str {
        FLAC_MIME
    }

    fn feed(&mut self, block: &AudioBlock) -> Result<Vec<EncodedChunk>, EncoderError> {
        if self.paused {
            return Ok(Vec::new());
        }
        self.samples
            .extend(block.samples().iter().map(|&s| pcm16_from_f32(s) as i32));
        // Chunks are flushed at finish time
        Ok(Vec::new())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn finish(&mut self) -> Result<Vec<EncodedChunk>, EncoderError> {
        if self.samples.is_empty() {
            return Ok(Vec::new());
        }
        let samples = std::mem::take(&mut self.samples);
        let bytes = encode_flac(&samples, self.spec, self.block_size)?;

        let chunks = bytes
            .chunks(CHUNK_BYTES)
            .map(|part| EncodedChunk::new(FLAC_MIME, part.to_vec()))
            .collect();
        Ok(chunks)
    }
}

/// Factory for FLAC streaming encoders.
///
/// Prefers a block size matched to the capture cadence; when that
/// configuration does not verify, retries with the library default before
/// reporting the encoder unavailable.
#[derive(Debug, Default)]
pub struct FlacEncoderFactory;

impl FlacEncoderFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EncoderFactory for FlacEncoderFactory {
    fn create(&self, spec: StreamSpec) -> Result<Box<dyn StreamingEncoder>, EncoderError> {
        let block_size = match verify_config(Some(PREFERRED_BLOCK_SIZE)) {
            Ok(()) => Some(PREFERRED_BLOCK_SIZE),
            Err(reason) => {
                tracing::warn!("preferred FLAC configuration rejected: {reason}");
                verify_config(None).map_err(EncoderError::Unavailable)?;
                None
            }
        };
        Ok(Box::new(FlacStreamEncoder::new(spec, block_size)))
    }
}
