//! WAV encoder for the lossless export path
//!
//! Produces the canonical 44-byte RIFF/WAVE header followed by 16-bit
//! little-endian PCM: fmt chunk length 16, format tag 1, block align =
//! channels x 2, data length = 2 x sample count. The float-to-PCM mapping
//! is fixed: clamp to [-1.0, 1.0], scale negatives by 32768 and
//! non-negatives by 32767, truncate toward zero.

use std::io::Cursor;

/// WAV encoding errors
#[derive(Debug, thiserror::Error)]
pub enum WavEncodeError {
    #[error("Invalid WAV parameters: {0}")]
    InvalidSpec(String),

    #[error("WAV write failed: {0}")]
    Write(String),
}

/// Convert one float sample to 16-bit PCM.
///
/// Clamped to [-1.0, 1.0]; the asymmetric scale maps -1.0 onto i16::MIN
/// and 1.0 onto i16::MAX exactly. Fractional results truncate toward zero.
pub fn pcm16_from_f32(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Encode a flat interleaved sample sequence into a complete WAV file.
///
/// Pure function: the same samples, rate, and channel count always yield
/// identical bytes.
pub fn encode_wav(
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<u8>, WavEncodeError> {
    if channels == 0 {
        return Err(WavEncodeError::InvalidSpec("zero channels".to_string()));
    }
    if sample_rate == 0 {
        return Err(WavEncodeError::InvalidSpec("zero sample rate".to_string()));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| WavEncodeError::Write(e.to_string()))?;
        for &sample in samples {
            writer
                .write_sample(pcm16_from_f32(sample))
                .map_err(|e| WavEncodeError::Write(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| WavEncodeError::Write(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}
