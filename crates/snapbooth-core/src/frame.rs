//! Frame representation for captured video stills
//!
//! This module provides the common Frame type handed from the renderer to the
//! snapshot pipeline.

use std::sync::Arc;

/// A still frame captured from the rendering surface
#[derive(Clone)]
pub struct Frame {
    /// Raw pixel data in RGBA format
    data: Arc<Vec<u8>>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture sequence number
    pub sequence: u64,
    /// Timestamp in milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl Frame {
    /// Create a new frame from RGBA pixel data
    pub fn new(data: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            data: Arc::new(data),
            width,
            height,
            sequence,
            timestamp_ms,
        }
    }

    /// Get the raw pixel data as a slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the number of bytes per row (stride)
    pub fn stride(&self) -> usize {
        (self.width * 4) as usize
    }

    /// Get total size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Check if frame dimensions are valid for the buffer
    pub fn is_valid(&self) -> bool {
        let expected_size = self.width as usize * self.height as usize * 4;
        self.data.len() >= expected_size && self.width > 0 && self.height > 0
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("size", &self.data.len())
            .finish()
    }
}
