//! Encoding adapters
//!
//! WAV for the lossless path (pure function, canonical header) and a
//! flacenc-backed streaming encoder for the compressed path.

mod flac_stream;
pub mod wav;

pub use flac_stream::{FlacEncoderFactory, FLAC_MIME};
pub use wav::{encode_wav, pcm16_from_f32, WavEncodeError};
