//! Device enumeration port interface

use super::source::CaptureError;

/// An available audio input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: String,
    pub label: String,
}

/// Port for listing input devices.
/// One-shot external data; the session only consumes the ids.
pub trait DeviceEnumerator: Send + Sync {
    fn list_input_devices(&self) -> Result<Vec<InputDevice>, CaptureError>;
}
