//! Raw sample block value object

/// One fixed-size chunk of floating-point samples delivered per capture
/// callback, tagged with its channel count.
///
/// Samples are stored interleaved channel-minor: for each time index, all
/// channel values appear before the next time index begins. Platform
/// backends that already deliver interleaved data use `from_interleaved`;
/// planar sources are interleaved at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBlock {
    channels: u16,
    samples: Vec<f32>,
}

impl AudioBlock {
    /// Wrap an already-interleaved sample slice
    pub fn from_interleaved(channels: u16, samples: Vec<f32>) -> Self {
        debug_assert!(channels > 0);
        Self { channels, samples }
    }

    /// Interleave one slice per channel into a single block.
    ///
    /// All planes must have equal length; the result has
    /// `planes.len() * plane_len` samples in the pattern
    /// `[ch0[0], ch1[0], .., ch0[1], ch1[1], ..]`.
    pub fn from_planar(planes: &[Vec<f32>]) -> Self {
        debug_assert!(!planes.is_empty());
        let channels = planes.len();
        if channels == 1 {
            return Self::from_interleaved(1, planes[0].clone());
        }

        let frames = planes[0].len();
        debug_assert!(planes.iter().all(|p| p.len() == frames));

        let mut samples = Vec::with_capacity(channels * frames);
        for frame in 0..frames {
            for plane in planes {
                samples.push(plane[frame]);
            }
        }
        Self {
            channels: channels as u16,
            samples,
        }
    }

    /// Channel count this block was captured with
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Total sample count (all channels)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the block carries no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the block, yielding its interleaved samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
