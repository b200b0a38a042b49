//! Face-region and eye-center location.
//!
//! The face box from the detector is converted to a pixel rectangle; a
//! second landmark pass over that crop (higher relative resolution) then
//! yields per-eye centers from the eyelid contour extremes.

use tracing::debug;

use crate::domain::{norm_to_pixel, CropRect, EditError, EyeSide, FaceLandmarks, RelativeBox};

/// Converts the detector's relative bounding box to an in-bounds pixel
/// rectangle.
///
/// # Errors
///
/// Returns [`EditError::LandmarkGeometry`] if the clamped box has no area.
pub fn face_rect(
    rbox: &RelativeBox,
    img_width: u32,
    img_height: u32,
) -> Result<CropRect, EditError> {
    rbox.to_pixels(img_width, img_height).ok_or_else(|| {
        EditError::LandmarkGeometry(format!(
            "face box {rbox:?} clamps to an empty rectangle in a {img_width}x{img_height} image"
        ))
    })
}

/// Per-eye pixel centers within a face crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeCenters {
    /// Center of the subject's right eye, crop-local `(x, y)`.
    pub right: (u32, u32),
    /// Center of the subject's left eye, crop-local `(x, y)`.
    pub left: (u32, u32),
}

impl EyeCenters {
    /// Center of one eye.
    #[must_use]
    pub const fn for_side(&self, side: EyeSide) -> (u32, u32) {
        match side {
            EyeSide::Right => self.right,
            EyeSide::Left => self.left,
        }
    }
}

/// Derives both eye centers from landmarks computed within a face crop.
///
/// For each eye, both endpoints of every eyelid edge are collected; the eye
/// bounding box is spanned by the row and column extremes and the center is
/// its midpoint.
///
/// # Errors
///
/// Returns [`EditError::LandmarkGeometry`] if a contour is empty or
/// references a point outside the set.
pub fn eye_centers(
    landmarks: &FaceLandmarks,
    crop_width: u32,
    crop_height: u32,
) -> Result<EyeCenters, EditError> {
    let right = eye_center(landmarks, EyeSide::Right, crop_width, crop_height)?;
    let left = eye_center(landmarks, EyeSide::Left, crop_width, crop_height)?;
    debug!(?right, ?left, "eye centers located");
    Ok(EyeCenters { right, left })
}

fn eye_center(
    landmarks: &FaceLandmarks,
    side: EyeSide,
    crop_width: u32,
    crop_height: u32,
) -> Result<(u32, u32), EditError> {
    let mut min_x = i64::MAX;
    let mut max_x = i64::MIN;
    let mut min_y = i64::MAX;
    let mut max_y = i64::MIN;

    for edge in landmarks.contours().eyelid(side) {
        for &index in edge {
            let point = landmarks.point(index)?;
            let (px, py) = norm_to_pixel(point.x, point.y, crop_width, crop_height);
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
    }

    if min_x > max_x {
        return Err(EditError::LandmarkGeometry(format!(
            "empty eyelid contour for {side:?} eye"
        )));
    }

    let cx = ((min_x + max_x) / 2).clamp(0, i64::from(crop_width.saturating_sub(1)));
    let cy = ((min_y + max_y) / 2).clamp(0, i64::from(crop_height.saturating_sub(1)));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok((cx as u32, cy as u32))
}
