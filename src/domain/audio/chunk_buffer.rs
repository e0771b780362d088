//! Encoded chunk accumulation for the compressed export path

/// Fallback container type when no chunk reported a MIME type.
/// Defensive only; a working encoder always tags its output.
pub const FALLBACK_CONTAINER_MIME: &str = "audio/ogg";

/// Opaque compressed-audio bytes emitted by a streaming encoder,
/// tagged with the encoder's reported MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChunk {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl EncodedChunk {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Accumulates `EncodedChunk`s in arrival order until finalize,
/// dropping zero-length chunks on entry.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<EncodedChunk>,
}

impl ChunkBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk; zero-length chunks are discarded
    pub fn push(&mut self, chunk: EncodedChunk) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    /// Number of retained chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate retained chunks into one byte buffer tagged with the
    /// MIME type of the first chunk that reported one. Returns `None`
    /// when nothing was retained.
    pub fn finalize(self) -> Option<(Vec<u8>, String)> {
        if self.chunks.is_empty() {
            return None;
        }

        let mime = self
            .chunks
            .iter()
            .find(|c| !c.mime_type.is_empty())
            .map(|c| c.mime_type.clone())
            .unwrap_or_else(|| FALLBACK_CONTAINER_MIME.to_string());

        let total: usize = self.chunks.iter().map(|c| c.bytes.len()).sum();
        let mut bytes = Vec::with_capacity(total);
        for chunk in self.chunks {
            bytes.extend(chunk.bytes);
        }
        Some((bytes, mime))
    }
}
