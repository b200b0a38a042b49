//! Binary mask helpers.

use image::{GrayImage, Luma};

/// Builds an elliptical structuring mask inscribed in a `width` x `height`
/// rectangle: 255 inside the ellipse, 0 outside.
#[must_use]
pub fn ellipse_element(width: u32, height: u32) -> GrayImage {
    #[allow(clippy::cast_precision_loss)]
    let (cx, cy) = (
        width.saturating_sub(1) as f32 / 2.0,
        height.saturating_sub(1) as f32 / 2.0,
    );
    #[allow(clippy::cast_precision_loss)]
    let rx = (width as f32 / 2.0).max(0.5);
    #[allow(clippy::cast_precision_loss)]
    let ry = (height as f32 / 2.0).max(0.5);

    GrayImage::from_fn(width, height, |x, y| {
        #[allow(clippy::cast_precision_loss)]
        let dx = (x as f32 - cx) / rx;
        #[allow(clippy::cast_precision_loss)]
        let dy = (y as f32 - cy) / ry;
        if dx * dx + dy * dy <= 1.0 {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Pixelwise AND of two binary masks of identical shape.
#[must_use]
pub fn intersect(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0] & b.get_pixel(x, y).0[0]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_is_binary_and_centered() {
        let el = ellipse_element(11, 7);
        assert!(el.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        // Center is inside, corners are outside.
        assert_eq!(el.get_pixel(5, 3).0[0], 255);
        assert_eq!(el.get_pixel(0, 0).0[0], 0);
        assert_eq!(el.get_pixel(10, 6).0[0], 0);
    }

    #[test]
    fn test_intersect_keeps_common_pixels() {
        let a = GrayImage::from_fn(4, 1, |x, _| Luma([if x < 3 { 255 } else { 0 }]));
        let b = GrayImage::from_fn(4, 1, |x, _| Luma([if x > 0 { 255 } else { 0 }]));
        let out = intersect(&a, &b);
        assert_eq!(out.as_raw(), &[0, 255, 255, 0]);
    }
}
