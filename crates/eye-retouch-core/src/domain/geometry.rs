//! Pixel-space and relative rectangle types.

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, always fully contained in its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CropRect {
    /// Builds a rectangle from inclusive-exclusive corner coordinates,
    /// clamped to the `img_width` x `img_height` bounds.
    ///
    /// Returns `None` if the clamped rectangle has no area.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_corners(
        (x0, y0): (i64, i64),
        (x1, y1): (i64, i64),
        img_width: u32,
        img_height: u32,
    ) -> Option<Self> {
        let x0 = x0.clamp(0, i64::from(img_width));
        let y0 = y0.clamp(0, i64::from(img_height));
        let x1 = x1.clamp(0, i64::from(img_width));
        let y1 = y1.clamp(0, i64::from(img_height));

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the pixel coordinate lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Face bounding box in normalized `[0,1]` coordinates, as produced by the
/// face-box detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeBox {
    /// Left edge, normalized.
    pub x: f32,
    /// Top edge, normalized.
    pub y: f32,
    /// Width, normalized.
    pub width: f32,
    /// Height, normalized.
    pub height: f32,
}

impl RelativeBox {
    /// Converts to an absolute pixel rectangle clamped to the image bounds.
    #[must_use]
    pub fn to_pixels(&self, img_width: u32, img_height: u32) -> Option<CropRect> {
        let start = norm_to_pixel(self.x, self.y, img_width, img_height);
        let end = norm_to_pixel(
            self.x + self.width,
            self.y + self.height,
            img_width,
            img_height,
        );
        CropRect::from_corners(start, end, img_width, img_height)
    }
}

/// Converts a normalized `[0,1]` point to floored pixel coordinates.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn norm_to_pixel(x: f32, y: f32, img_width: u32, img_height: u32) -> (i64, i64) {
    let px = (f64::from(x) * f64::from(img_width)).floor() as i64;
    let py = (f64::from(y) * f64::from(img_height)).floor() as i64;
    (px, py)
}
