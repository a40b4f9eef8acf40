//! Configuration types for SnapBooth

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for SnapBooth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rendering surface width in pixels
    pub viewport_width: u32,
    /// Rendering surface height in pixels
    pub viewport_height: u32,
    /// Intrinsic video size to assume for cameras that never report one.
    /// Applied when playback starts; overridden by a decoder-reported size.
    pub known_video_size: Option<(u32, u32)>,
    /// JPEG quality for saved snapshots (1-100)
    pub jpeg_quality: u8,
    /// How long a capture request may wait for the renderer, in milliseconds
    pub capture_timeout_ms: u64,
    /// TCP connect timeout for the camera probe, in milliseconds
    pub connect_timeout_ms: u64,
    /// Snapshot directory (defaults to the cache dir when None)
    pub snapshot_dir: Option<PathBuf>,
    /// Gallery directory for public copies (defaults to the pictures dir)
    pub gallery_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_width: 1080,
            viewport_height: 1920,
            known_video_size: None,
            jpeg_quality: 95,
            capture_timeout_ms: 2000,
            connect_timeout_ms: 5000,
            snapshot_dir: None,
            gallery_dir: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set viewport dimensions
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Builder pattern: set the assumed intrinsic video size
    pub fn with_known_video_size(mut self, width: u32, height: u32) -> Self {
        self.known_video_size = Some((width, height));
        self
    }

    /// Builder pattern: set JPEG quality
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Builder pattern: set the capture timeout
    pub fn with_capture_timeout_ms(mut self, ms: u64) -> Self {
        self.capture_timeout_ms = ms;
        self
    }

    /// Builder pattern: set the snapshot directory
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Builder pattern: set the gallery directory
    pub fn with_gallery_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.gallery_dir = Some(dir.into());
        self
    }

    /// Capture timeout as a Duration
    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    /// Connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::new()
            .with_viewport(720, 1280)
            .with_known_video_size(2560, 1440)
            .with_jpeg_quality(80)
            .with_capture_timeout_ms(500);

        assert_eq!(config.viewport_width, 720);
        assert_eq!(config.viewport_height, 1280);
        assert_eq!(config.known_video_size, Some((2560, 1440)));
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.capture_timeout(), Duration::from_millis(500));
    }
}
