//! Letterbox/pillarbox-aware crop geometry
//!
//! When a fixed-aspect video is rendered into a viewport with a different
//! aspect ratio and the renderer pads rather than stretches, a still captured
//! from that viewport contains black bars. [`compute_crop`] computes the
//! rectangle within the captured bitmap that holds actual video content.

use serde::{Deserialize, Serialize};

/// Dimensions involved in a frame capture, as reported by the collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameGeometry {
    /// Intrinsic width of the video stream (0 if not yet known)
    pub video_width: u32,
    /// Intrinsic height of the video stream (0 if not yet known)
    pub video_height: u32,
    /// Width of the on-screen rendering surface at capture time
    pub viewport_width: u32,
    /// Height of the on-screen rendering surface at capture time
    pub viewport_height: u32,
    /// Width of the raw captured bitmap (usually equals the viewport width)
    pub bitmap_width: u32,
    /// Height of the raw captured bitmap (usually equals the viewport height)
    pub bitmap_height: u32,
}

/// An axis-aligned rectangle within a captured bitmap.
///
/// Always satisfies `x + width <= bitmap_width` and
/// `y + height <= bitmap_height` for the bitmap it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Rectangle covering an entire bitmap
    pub fn full(bitmap_width: u32, bitmap_height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: bitmap_width,
            height: bitmap_height,
        }
    }

    /// Whether this rectangle covers the given bitmap entirely
    pub fn covers(&self, bitmap_width: u32, bitmap_height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == bitmap_width && self.height == bitmap_height
    }

    /// Whether this rectangle has zero area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Compute the video-content rectangle within a captured bitmap.
///
/// Pure and total: never panics, never fails. Inputs that leave no basis for
/// cropping (unknown video size, degenerate viewport, rounding collapse)
/// degrade to the full bitmap.
pub fn compute_crop(geometry: FrameGeometry) -> CropRect {
    let FrameGeometry {
        video_width,
        video_height,
        viewport_width,
        viewport_height,
        bitmap_width,
        bitmap_height,
    } = geometry;

    let full = CropRect::full(bitmap_width, bitmap_height);

    // Without the intrinsic video size there is no aspect ratio to crop to.
    if video_width == 0 || video_height == 0 {
        tracing::warn!("Video dimensions not available, keeping full bitmap");
        return full;
    }
    // A zero-sized viewport has no meaningful aspect ratio either.
    if viewport_width == 0 || viewport_height == 0 {
        return full;
    }
    if bitmap_width == 0 || bitmap_height == 0 {
        return full;
    }

    let video_aspect = f64::from(video_width) / f64::from(video_height);
    let viewport_aspect = f64::from(viewport_width) / f64::from(viewport_height);

    let (x, y, width, height) = if video_aspect > viewport_aspect {
        // Video is relatively wider than the viewport: content spans the full
        // bitmap width, bars split evenly above and below.
        let height = (f64::from(bitmap_width) / video_aspect).round() as u32;
        let y = bitmap_height.saturating_sub(height) / 2;
        (0, y, bitmap_width, height)
    } else {
        // Video is relatively taller: content spans the full bitmap height,
        // bars split evenly left and right.
        let width = (f64::from(bitmap_height) * video_aspect).round() as u32;
        let x = bitmap_width.saturating_sub(width) / 2;
        (x, 0, width, bitmap_height)
    };

    // Clamp so the rectangle lies within the bitmap no matter how
    // inconsistent the inputs were.
    let x = x.min(bitmap_width - 1);
    let y = y.min(bitmap_height - 1);
    let width = width.min(bitmap_width - x);
    let height = height.min(bitmap_height - y);

    if width == 0 || height == 0 {
        return full;
    }

    CropRect {
        x,
        y,
        width,
        height,
    }
}
