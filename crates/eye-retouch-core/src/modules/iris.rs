//! Iris segmentation and recoloring.
//!
//! The mask builder separates the darker iris from the lighter sclera with
//! an Otsu-style inverse threshold, then clips artifacts (eyelashes, eyelid
//! edges) with an elliptical structuring mask sized to the crop, dilates
//! once to close pinholes, and clips the overshoot back to the ellipse.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use tracing::debug;

use crate::domain::{
    norm_to_pixel, CropRect, EditError, EyeSide, FaceLandmarks, Patch,
};
use crate::imaging::{ellipse_element, hsv_to_rgb, intersect, rgb_to_hsv};
use crate::modules::eye_state::EyeOpenness;

/// Dilation radius under the L-infinity norm; 1 gives a 3x3 square kernel.
const DILATE_RADIUS: u8 = 1;

/// One eye's crop rectangle, openness flag, iris crop, and binary mask.
#[derive(Debug, Clone)]
pub struct EyeRegion {
    /// Which eye this region belongs to.
    pub side: EyeSide,
    /// Crop rectangle in portrait coordinates, always in-bounds.
    pub rect: CropRect,
    /// Whether the eye was classified open.
    pub open: bool,
    /// Pixels of the crop rectangle.
    pub crop: RgbImage,
    /// Binary iris mask, values 0 or 255, same shape as `crop`.
    pub mask: GrayImage,
}

/// Segments the iris of one eye into a binary mask.
///
/// Returns `Ok(None)` for eyes classified closed; they are skipped entirely
/// so eyelid skin is never recolored.
///
/// # Errors
///
/// Returns [`EditError::LandmarkGeometry`] if the four iris extreme points
/// do not form a positive-area rectangle inside the image.
pub fn build_region(
    image: &RgbImage,
    landmarks: &FaceLandmarks,
    side: EyeSide,
    openness: &EyeOpenness,
) -> Result<Option<EyeRegion>, EditError> {
    if !openness.is_open(side) {
        debug!(?side, "eye closed, skipping iris segmentation");
        return Ok(None);
    }

    let rect = iris_rect(image, landmarks, side)?;
    let crop = image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image();

    // Darker iris against lighter sclera: inverse binarization with a
    // variance-maximizing cutoff.
    let gray = image::imageops::grayscale(&crop);
    let level = otsu_level(&gray);
    let binarized = threshold(&gray, level, ThresholdType::BinaryInverted);

    let ellipse = ellipse_element(rect.width, rect.height);
    let mask = intersect(&binarized, &ellipse);
    let mask = dilate(&mask, Norm::LInf, DILATE_RADIUS);
    let mask = intersect(&mask, &ellipse);

    debug!(?side, ?rect, otsu = level, "iris mask built");

    Ok(Some(EyeRegion {
        side,
        rect,
        open: true,
        crop,
        mask,
    }))
}

/// Derives the crop rectangle from the four extreme iris points
/// (leftmost, topmost, bottommost, rightmost).
fn iris_rect(
    image: &RgbImage,
    landmarks: &FaceLandmarks,
    side: EyeSide,
) -> Result<CropRect, EditError> {
    let (w, h) = image.dimensions();
    let indices = landmarks.contours().iris(side);

    let mut px = [(0i64, 0i64); 4];
    for (slot, &index) in px.iter_mut().zip(indices.iter()) {
        let point = landmarks.point(index)?;
        *slot = norm_to_pixel(point.x, point.y, w, h);
    }
    let [left, top, bottom, right] = px;

    CropRect::from_corners((left.0, top.1), (right.0, bottom.1), w, h).ok_or_else(|| {
        EditError::LandmarkGeometry(format!(
            "iris contour of {side:?} eye does not bound a positive-area rectangle"
        ))
    })
}

/// Rewrites hue and saturation of every mask-selected pixel.
///
/// Hue is overwritten with `hue` (OpenCV `[0,180)` scale); `sat_delta` is
/// added to the saturation channel and the sum clamped to `[0,255]`; value
/// is untouched. Unmasked pixels pass through unchanged. Returns the crop
/// as a patch for the region's rectangle.
#[must_use]
pub fn recolor(region: &EyeRegion, hue: u8, sat_delta: i16) -> Patch {
    let mut pixels = region.crop.clone();

    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        if region.mask.get_pixel(x, y).0[0] != 255 {
            continue;
        }
        let Rgb([r, g, b]) = *pixel;
        let (_, s, v) = rgb_to_hsv(r, g, b);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let s = (i16::from(s) + sat_delta).clamp(0, 255) as u8;
        let (r, g, b) = hsv_to_rgb(hue, s, v);
        *pixel = Rgb([r, g, b]);
    }

    Patch {
        rect: region.rect,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FaceContours, NormPoint};

    /// 40x40 image: white background with a dark 10px-radius iris at (20,20).
    fn iris_image() -> RgbImage {
        RgbImage::from_fn(40, 40, |x, y| {
            let dx = i32::try_from(x).unwrap() - 20;
            let dy = i32::try_from(y).unwrap() - 20;
            if dx * dx + dy * dy <= 8 * 8 {
                Rgb([60, 40, 30])
            } else {
                Rgb([240, 240, 235])
            }
        })
    }

    fn iris_landmarks() -> FaceLandmarks {
        // Extreme points of a 20x20 iris box centered at (20,20) in a 40x40
        // image, ordered leftmost/topmost/bottommost/rightmost.
        let points = vec![
            NormPoint { x: 0.25, y: 0.5 },
            NormPoint { x: 0.5, y: 0.25 },
            NormPoint { x: 0.5, y: 0.75 },
            NormPoint { x: 0.75, y: 0.5 },
        ];
        let contours = FaceContours {
            right_eye: vec![],
            left_eye: vec![],
            right_iris: [0, 1, 2, 3],
            left_iris: [0, 1, 2, 3],
        };
        FaceLandmarks::new(points, contours)
    }

    const BOTH_OPEN: EyeOpenness = EyeOpenness { right: true, left: true };
    const BOTH_CLOSED: EyeOpenness = EyeOpenness { right: false, left: false };

    #[test]
    fn test_closed_eye_is_skipped() {
        let image = iris_image();
        let region =
            build_region(&image, &iris_landmarks(), EyeSide::Right, &BOTH_CLOSED).unwrap();
        assert!(region.is_none());
    }

    #[test]
    fn test_mask_is_binary_and_matches_crop_shape() {
        let image = iris_image();
        let region = build_region(&image, &iris_landmarks(), EyeSide::Right, &BOTH_OPEN)
            .unwrap()
            .unwrap();

        assert_eq!(region.rect, CropRect { x: 10, y: 10, width: 20, height: 20 });
        assert_eq!(region.mask.dimensions(), region.crop.dimensions());
        assert!(region.mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_mask_selects_dark_iris_not_sclera() {
        let image = iris_image();
        let region = build_region(&image, &iris_landmarks(), EyeSide::Right, &BOTH_OPEN)
            .unwrap()
            .unwrap();

        // Crop-local center lies on the iris, the corner on the sclera.
        assert_eq!(region.mask.get_pixel(10, 10).0[0], 255);
        assert_eq!(region.mask.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_degenerate_iris_rect_is_geometry_error() {
        let image = iris_image();
        // Rightmost point left of the leftmost point.
        let points = vec![
            NormPoint { x: 0.75, y: 0.5 },
            NormPoint { x: 0.5, y: 0.25 },
            NormPoint { x: 0.5, y: 0.75 },
            NormPoint { x: 0.25, y: 0.5 },
        ];
        let contours = FaceContours {
            right_eye: vec![],
            left_eye: vec![],
            right_iris: [0, 1, 2, 3],
            left_iris: [0, 1, 2, 3],
        };
        let lm = FaceLandmarks::new(points, contours);

        let err = build_region(&image, &lm, EyeSide::Right, &BOTH_OPEN).unwrap_err();
        assert!(matches!(err, EditError::LandmarkGeometry(_)));
    }

    #[test]
    fn test_recolor_only_touches_masked_pixels() {
        let image = iris_image();
        let region = build_region(&image, &iris_landmarks(), EyeSide::Right, &BOTH_OPEN)
            .unwrap()
            .unwrap();

        let patch = recolor(&region, 120, 40);
        assert_eq!(patch.rect, region.rect);

        for (x, y, pixel) in patch.pixels.enumerate_pixels() {
            if region.mask.get_pixel(x, y).0[0] == 255 {
                let (h, _, _) = rgb_to_hsv(pixel.0[0], pixel.0[1], pixel.0[2]);
                assert!(i16::from(h).abs_diff(120) <= 2, "hue {h} at ({x},{y})");
            } else {
                assert_eq!(pixel, region.crop.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_recolor_clamps_saturation() {
        let image = iris_image();
        let region = build_region(&image, &iris_landmarks(), EyeSide::Right, &BOTH_OPEN)
            .unwrap()
            .unwrap();

        // Extreme positive delta clamps to full saturation, extreme negative
        // delta clamps to zero (gray), without wrapping.
        let saturated = recolor(&region, 60, 1000);
        let desaturated = recolor(&region, 60, -1000);
        for (x, y, _) in region.mask.enumerate_pixels() {
            if region.mask.get_pixel(x, y).0[0] != 255 {
                continue;
            }
            let p = saturated.pixels.get_pixel(x, y);
            let (_, s, _) = rgb_to_hsv(p.0[0], p.0[1], p.0[2]);
            assert!(s >= 250, "saturation {s} should clamp high at ({x},{y})");

            let p = desaturated.pixels.get_pixel(x, y);
            let (_, s, _) = rgb_to_hsv(p.0[0], p.0[1], p.0[2]);
            assert!(s <= 5, "saturation {s} should clamp low at ({x},{y})");
        }
    }
}
