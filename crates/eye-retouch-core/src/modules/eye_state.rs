//! Per-eye openness classification from eyelid landmark geometry.

use tracing::debug;

use crate::domain::{EditError, EyeSide, FaceLandmarks};

/// Minimum vertical eyelid spread, in pixels, to classify an eye as open.
pub const DEFAULT_OPENNESS_THRESHOLD: u32 = 15;

/// Openness flags for both eyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeOpenness {
    /// Whether the subject's right eye is open.
    pub right: bool,
    /// Whether the subject's left eye is open.
    pub left: bool,
}

impl EyeOpenness {
    /// Openness of one eye.
    #[must_use]
    pub const fn is_open(&self, side: EyeSide) -> bool {
        match side {
            EyeSide::Right => self.right,
            EyeSide::Left => self.left,
        }
    }
}

/// Classifies both eyes as open or closed.
///
/// Scans both endpoints of every eyelid-contour edge, converts them to
/// pixel coordinates, and compares the vertical min/max spread against the
/// threshold.
///
/// # Errors
///
/// Returns [`EditError::LandmarkGeometry`] if a contour references a point
/// outside the landmark set.
pub fn classify(
    landmarks: &FaceLandmarks,
    img_width: u32,
    img_height: u32,
    threshold: u32,
) -> Result<EyeOpenness, EditError> {
    let right = eyelid_spread(landmarks, EyeSide::Right, img_width, img_height)?;
    let left = eyelid_spread(landmarks, EyeSide::Left, img_width, img_height)?;

    debug!(right_spread = right, left_spread = left, threshold, "eye openness");

    Ok(EyeOpenness {
        right: right > i64::from(threshold),
        left: left > i64::from(threshold),
    })
}

/// Vertical pixel spread of one eye's eyelid contour.
fn eyelid_spread(
    landmarks: &FaceLandmarks,
    side: EyeSide,
    img_width: u32,
    img_height: u32,
) -> Result<i64, EditError> {
    let mut min_y = i64::MAX;
    let mut max_y = i64::MIN;

    for edge in landmarks.contours().eyelid(side) {
        for &index in edge {
            let point = landmarks.point(index)?;
            let (_, py) =
                crate::domain::norm_to_pixel(point.x, point.y, img_width, img_height);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
    }

    if min_y > max_y {
        return Err(EditError::LandmarkGeometry(format!(
            "empty eyelid contour for {side:?} eye"
        )));
    }
    Ok(max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FaceContours, NormPoint};

    fn landmarks_with_spreads(right_px: f32, left_px: f32) -> FaceLandmarks {
        // 100x100 image; two-edge contours per eye spanning the given spread.
        let mut points = vec![NormPoint { x: 0.5, y: 0.5 }; 8];
        points[0] = NormPoint { x: 0.3, y: 0.5 };
        points[1] = NormPoint { x: 0.35, y: 0.5 + right_px / 100.0 };
        points[2] = NormPoint { x: 0.7, y: 0.5 };
        points[3] = NormPoint { x: 0.75, y: 0.5 + left_px / 100.0 };

        let contours = FaceContours {
            right_eye: vec![[0, 1]],
            left_eye: vec![[2, 3]],
            right_iris: [4, 5, 6, 7],
            left_iris: [4, 5, 6, 7],
        };
        FaceLandmarks::new(points, contours)
    }

    #[test]
    fn test_wide_spread_is_open() {
        let lm = landmarks_with_spreads(20.0, 20.0);
        let state = classify(&lm, 100, 100, 15).unwrap();
        assert!(state.right);
        assert!(state.left);
    }

    #[test]
    fn test_narrow_spread_is_closed() {
        let lm = landmarks_with_spreads(10.0, 20.0);
        let state = classify(&lm, 100, 100, 15).unwrap();
        assert!(!state.right);
        assert!(state.left);
        assert!(!state.is_open(EyeSide::Right));
        assert!(state.is_open(EyeSide::Left));
    }

    #[test]
    fn test_spread_equal_to_threshold_is_closed() {
        let lm = landmarks_with_spreads(15.0, 15.0);
        let state = classify(&lm, 100, 100, 15).unwrap();
        assert!(!state.right);
        assert!(!state.left);
    }

    #[test]
    fn test_bad_contour_index_is_geometry_error() {
        let contours = FaceContours {
            right_eye: vec![[0, 99]],
            left_eye: vec![[0, 1]],
            right_iris: [0, 0, 0, 0],
            left_iris: [0, 0, 0, 0],
        };
        let lm = FaceLandmarks::new(vec![NormPoint { x: 0.5, y: 0.5 }; 2], contours);
        assert!(matches!(
            classify(&lm, 100, 100, 15),
            Err(EditError::LandmarkGeometry(_))
        ));
    }
}
