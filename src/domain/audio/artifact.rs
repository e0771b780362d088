//! Output artifact value object

use chrono::{DateTime, Local};

/// MIME type of the lossless PCM export path
pub const WAV_MIME: &str = "audio/wav";

/// Map a MIME type to a filename extension.
/// Unknown types fall through to a generic binary extension.
pub fn extension_for_mime(mime: &str) -> &'static str {
    // Some encoders append codec parameters, e.g. "audio/webm;codecs=opus"
    let base = mime.split(';').next().unwrap_or(mime).trim();
    match base {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/mp3" | "audio/mpeg" => "mp3",
        "audio/mp4" => "m4a",
        _ => "bin",
    }
}

/// Value object for a finished recording: the encoded bytes, their MIME
/// type, and a suggested download filename.
#[derive(Debug, Clone)]
pub struct Artifact {
    bytes: Vec<u8>,
    mime_type: String,
    filename: String,
}

impl Artifact {
    /// Build an artifact with a timestamped suggested filename,
    /// `recording-<yyyymmdd-hhmmss>.<ext>` with the extension derived
    /// from the MIME type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self::with_timestamp(bytes, mime_type, Local::now())
    }

    /// Build with an explicit timestamp (deterministic for tests)
    pub fn with_timestamp(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        let mime_type = mime_type.into();
        let filename = format!(
            "recording-{}.{}",
            timestamp.format("%Y%m%d-%H%M%S"),
            extension_for_mime(&mime_type)
        );
        Self {
            bytes,
            mime_type,
            filename,
        }
    }

    /// The encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// MIME type of the bytes
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Suggested download filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Size in bytes
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
