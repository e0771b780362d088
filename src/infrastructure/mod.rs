//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the application ports: cpal capture,
//! WAV/FLAC encoding, XDG configuration.

pub mod audio;
pub mod capture;
pub mod config;
pub mod encoding;

pub use audio::CpalInputSource;
pub use capture::{DefaultCaptureFactory, EncodedCapture, PcmCapture};
pub use config::XdgConfigStore;
pub use encoding::{FlacEncoderFactory, FLAC_MIME};

use crate::application::RecordingSession;

/// The session type wired with the default platform adapters
pub type DefaultSession = RecordingSession<CpalInputSource, DefaultCaptureFactory<FlacEncoderFactory>>;

/// Create a recording session over the default cpal input source and
/// FLAC encoder factory
pub fn create_session() -> DefaultSession {
    RecordingSession::new(
        CpalInputSource::new(),
        DefaultCaptureFactory::new(FlacEncoderFactory::new()),
    )
}
