//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod devices;
pub mod encoder;
pub mod source;

// Re-export common types
pub use capture::{ActiveCapture, CaptureFactory, CaptureMode, FinalizeError};
pub use config::ConfigStore;
pub use devices::{DeviceEnumerator, InputDevice};
pub use encoder::{EncoderError, EncoderFactory, StreamingEncoder};
pub use source::{AcquireRequest, CaptureError, CaptureStream, InputSource, StreamGuard, StreamSpec};
