//! store::codec
//!
//! Gzip compression for stored revision content.
//!
//! # Storage
//!
//! Every revision's full content is stored as a standalone gzip stream
//! (`r<N>.gz`). There is no delta encoding; restoring any revision is a
//! single decode. The compression level comes from `[storage]` in the
//! repository configuration.

use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::error::OpError;

/// Encoder/decoder for revision content blobs.
#[derive(Debug, Clone, Copy)]
pub struct ContentCodec {
    level: Compression,
}

impl ContentCodec {
    /// Build a codec for a configured gzip level (0-9).
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level),
        }
    }

    /// Compress raw content into a gzip stream.
    pub fn encode(&self, content: &[u8], origin: &Path) -> Result<Vec<u8>, OpError> {
        let mut encoder = GzEncoder::new(Vec::new(), self.level);
        encoder
            .write_all(content)
            .and_then(|_| encoder.finish())
            .map_err(|e| OpError::io(origin, e))
    }

    /// Decompress a stored blob back into raw content.
    ///
    /// A blob that fails to decode is corruption: the store wrote it, so
    /// only external damage can make it unreadable.
    pub fn decode(&self, blob: &[u8], origin: &Path) -> Result<Vec<u8>, OpError> {
        let mut decoder = GzDecoder::new(blob);
        let mut content = Vec::new();
        decoder
            .read_to_end(&mut content)
            .map_err(|e| OpError::corrupt(origin, format!("gzip decode failed: {e}")))?;
        Ok(content)
    }
}

impl Default for ContentCodec {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn origin() -> PathBuf {
        PathBuf::from("r1.gz")
    }

    #[test]
    fn round_trips_content() {
        let codec = ContentCodec::new(6);
        let content = b"int main(void) {\n    return 0;\n}\n";

        let blob = codec.encode(content, &origin()).unwrap();
        let restored = codec.decode(&blob, &origin()).unwrap();
        assert_eq!(restored, content);
    }

    #[test]
    fn round_trips_empty_content() {
        let codec = ContentCodec::new(6);
        let blob = codec.encode(b"", &origin()).unwrap();
        assert_eq!(codec.decode(&blob, &origin()).unwrap(), b"");
    }

    #[test]
    fn level_zero_still_decodes() {
        let codec = ContentCodec::new(0);
        let content = vec![0x42u8; 4096];
        let blob = codec.encode(&content, &origin()).unwrap();
        assert_eq!(codec.decode(&blob, &origin()).unwrap(), content);
    }

    #[test]
    fn decoders_accept_other_levels() {
        let content = b"shared across levels\n";
        let blob = ContentCodec::new(9).encode(content, &origin()).unwrap();
        let restored = ContentCodec::new(1).decode(&blob, &origin()).unwrap();
        assert_eq!(restored, content);
    }

    #[test]
    fn garbage_blob_is_corruption() {
        let codec = ContentCodec::new(6);
        let err = codec.decode(b"not a gzip stream", &origin()).unwrap_err();
        assert!(matches!(err, OpError::Corrupt { .. }));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn truncated_blob_is_corruption() {
        let codec = ContentCodec::new(6);
        let blob = codec.encode(b"some longer content here\n", &origin()).unwrap();
        let err = codec.decode(&blob[..blob.len() / 2], &origin()).unwrap_err();
        assert!(matches!(err, OpError::Corrupt { .. }));
    }
}
