//! Snapshot processing pipeline
//!
//! Crop the raw frame down to the video content, encode a JPEG at the
//! configured quality, and persist it through the [`SnapshotStore`].

use crate::SnapshotStore;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, RgbaImage};
use snapbooth_core::{compute_crop, Config, CropRect, Error, Frame, FrameGeometry, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Processes captured frames into saved snapshots
#[derive(Debug, Clone)]
pub struct SnapshotPipeline {
    store: SnapshotStore,
    jpeg_quality: u8,
}

impl SnapshotPipeline {
    /// Create a pipeline with an explicit store and quality
    pub fn new(store: SnapshotStore, jpeg_quality: u8) -> Self {
        Self {
            store,
            jpeg_quality,
        }
    }

    /// Create a pipeline from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            SnapshotStore::from_config(config)?,
            config.jpeg_quality,
        ))
    }

    /// Crop, encode and save a captured frame. Returns the snapshot path.
    pub fn process(&self, frame: &Frame, geometry: FrameGeometry) -> Result<PathBuf> {
        if !frame.is_valid() {
            return Err(Error::InvalidFrame(format!(
                "{}x{} frame with {} bytes",
                frame.width,
                frame.height,
                frame.size()
            )));
        }

        let rect = compute_crop(geometry);
        debug!(
            "Crop region: x={}, y={}, w={}, h={} (video {}x{}, view {}x{}, bitmap {}x{})",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            geometry.video_width,
            geometry.video_height,
            geometry.viewport_width,
            geometry.viewport_height,
            geometry.bitmap_width,
            geometry.bitmap_height
        );

        let pixel_bytes = frame.width as usize * frame.height as usize * 4;
        let raw = frame.data()[..pixel_bytes].to_vec();
        let image = RgbaImage::from_raw(frame.width, frame.height, raw)
            .ok_or_else(|| Error::InvalidFrame("pixel buffer does not match dimensions".into()))?;

        let cropped = self.crop_to_content(image, rect, frame);
        let rgb = DynamicImage::ImageRgba8(cropped).to_rgb8();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| Error::Encode(e.to_string()))?;

        self.store.save(&jpeg)
    }

    /// Apply the crop, degrading to the uncropped frame when the rectangle
    /// cannot be used
    fn crop_to_content(&self, image: RgbaImage, rect: CropRect, frame: &Frame) -> RgbaImage {
        if rect.covers(frame.width, frame.height) {
            return image;
        }
        if rect.is_empty()
            || rect.x + rect.width > frame.width
            || rect.y + rect.height > frame.height
        {
            warn!("Unusable crop region {:?}, keeping full frame", rect);
            return image;
        }
        imageops::crop_imm(&image, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}
