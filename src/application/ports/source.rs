//! Input source port interfaces

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::audio::AudioBlock;

/// Stream acquisition errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("Input device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
}

/// Stream parameters as negotiated with the device.
/// Whatever the device delivers is what gets buffered and written to the
/// output header; there is no resampling and no downmixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Parameters for opening an input stream
#[derive(Debug, Clone, Default)]
pub struct AcquireRequest {
    /// Exact device to open; `None` requests the system default
    pub device_id: Option<String>,
    /// Advisory sample rate; the device's negotiated rate wins
    pub sample_rate: Option<u32>,
}

/// Control half of an open capture stream.
///
/// Dropping the guard releases the platform stream and its capture thread;
/// this is the release path on every exit (stop, failure, session drop).
pub trait StreamGuard: Send {
    /// Gate sample delivery at the capture level. While closed, the
    /// callback forwards nothing, so nothing accumulates during pause.
    fn set_capturing(&self, capturing: bool);
}

/// A successfully acquired input stream: the negotiated parameters, the
/// channel blocks arrive on, and the release/gate guard.
pub struct CaptureStream {
    pub spec: StreamSpec,
    pub blocks: mpsc::UnboundedReceiver<AudioBlock>,
    pub guard: Box<dyn StreamGuard>,
}

/// Port for acquiring a live audio input stream
#[async_trait]
pub trait InputSource: Send + Sync {
    /// Open an input stream on the requested device.
    ///
    /// On failure no partial stream is left open: any resources opened
    /// during acquisition are released before the error surfaces.
    async fn acquire(&self, request: AcquireRequest) -> Result<CaptureStream, CaptureError>;
}
