//! Synthetic portrait builder for testing.

use eye_retouch_core::domain::{
    CropRect, FaceContours, FaceLandmarks, NormPoint, RelativeBox,
};
use image::{Rgb, RgbImage};

/// Distinct right-eyelid point indices of the face-mesh topology.
const RIGHT_EYE_POINT_IDS: [u32; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 246, 161, 160, 159, 158, 157, 173,
];

/// Distinct left-eyelid point indices of the face-mesh topology.
const LEFT_EYE_POINT_IDS: [u32; 16] = [
    263, 249, 390, 373, 374, 380, 381, 382, 362, 466, 388, 387, 386, 385, 384, 398,
];

/// A programmatically generated portrait with known eye geometry.
///
/// Renders a skin-tone image with two eyes (white sclera ellipse, dark
/// iris disk) and produces landmark sets consistent with that geometry,
/// both for the full frame and for the face crop.
#[derive(Debug, Clone)]
pub struct SyntheticPortrait {
    width: u32,
    height: u32,
    /// Absolute pixel center of the subject's right eye.
    pub right_eye: (u32, u32),
    /// Absolute pixel center of the subject's left eye.
    pub left_eye: (u32, u32),
    /// Iris half-size in pixels; the iris crop box is `2r` on a side.
    pub iris_radius: u32,
    /// Vertical eyelid spread of the right eye in pixels.
    pub right_spread: u32,
    /// Vertical eyelid spread of the left eye in pixels.
    pub left_spread: u32,
}

impl SyntheticPortrait {
    /// Frontal 512x512 portrait with both eyes open.
    #[must_use]
    pub fn frontal() -> Self {
        Self::with_size(512, 512)
    }

    /// Frontal portrait with custom dimensions; eyes scale with the frame.
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            right_eye: (width * 25 / 64, height / 2),
            left_eye: (width * 39 / 64, height / 2),
            iris_radius: (width / 50).max(8),
            right_spread: 24,
            left_spread: 24,
        }
    }

    /// Same portrait with the right eye closed (spread below the openness
    /// threshold); the rendered right eye keeps its pixels so skipped-eye
    /// identity can be asserted.
    #[must_use]
    pub fn with_right_eye_closed(mut self) -> Self {
        self.right_spread = 8;
        self
    }

    /// Image width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Renders the portrait pixels.
    #[must_use]
    pub fn image(&self) -> RgbImage {
        let eyes = [self.right_eye, self.left_eye];
        let r = self.iris_radius;

        RgbImage::from_fn(self.width, self.height, |x, y| {
            for &(ex, ey) in &eyes {
                let dx = f64::from(x) - f64::from(ex);
                let dy = f64::from(y) - f64::from(ey);

                // Dark iris disk, slightly inside the crop box.
                let ir = f64::from(r.saturating_sub(2));
                if dx * dx + dy * dy <= ir * ir {
                    return Rgb([60, 40, 30]);
                }

                // White sclera ellipse, wide enough to cover the iris
                // crop-box corners.
                let sx = dx / (f64::from(r) * 2.0);
                let sy = dy / (f64::from(r) * 1.6);
                if sx * sx + sy * sy <= 1.0 {
                    return Rgb([245, 242, 238]);
                }
            }
            Rgb([205, 170, 150])
        })
    }

    /// Relative face bounding box covering the middle half of the frame.
    #[must_use]
    pub fn face_box(&self) -> RelativeBox {
        RelativeBox {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
        }
    }

    /// The face box as a pixel rectangle.
    #[must_use]
    pub fn face_rect(&self) -> CropRect {
        CropRect {
            x: self.width / 4,
            y: self.height / 4,
            width: self.width / 2,
            height: self.height / 2,
        }
    }

    /// Landmarks normalized over the full frame (first-stage detection).
    #[must_use]
    pub fn landmarks(&self) -> FaceLandmarks {
        self.landmarks_in(CropRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        })
    }

    /// Landmarks normalized over the face crop (second-stage detection).
    #[must_use]
    pub fn crop_landmarks(&self) -> FaceLandmarks {
        self.landmarks_in(self.face_rect())
    }

    /// Eye centers in face-crop coordinates.
    #[must_use]
    pub fn crop_eye_centers(&self) -> ((u32, u32), (u32, u32)) {
        let rect = self.face_rect();
        (
            (self.right_eye.0 - rect.x, self.right_eye.1 - rect.y),
            (self.left_eye.0 - rect.x, self.left_eye.1 - rect.y),
        )
    }

    /// Iris crop rectangle of one eye in full-frame coordinates.
    #[must_use]
    pub fn iris_rect(&self, center: (u32, u32)) -> CropRect {
        CropRect {
            x: center.0 - self.iris_radius,
            y: center.1 - self.iris_radius,
            width: self.iris_radius * 2,
            height: self.iris_radius * 2,
        }
    }

    /// Builds the face-mesh landmark set relative to `frame`.
    fn landmarks_in(&self, frame: CropRect) -> FaceLandmarks {
        let mut points = vec![NormPoint { x: 0.5, y: 0.5 }; 478];

        #[allow(clippy::cast_possible_truncation)]
        let norm = |px: u32, py: u32| {
            let nx = (f64::from(px) - f64::from(frame.x)) / f64::from(frame.width);
            let ny = (f64::from(py) - f64::from(frame.y)) / f64::from(frame.height);
            NormPoint { x: nx as f32, y: ny as f32 }
        };

        let eyes = [
            (self.right_eye, self.right_spread, &RIGHT_EYE_POINT_IDS),
            (self.left_eye, self.left_spread, &LEFT_EYE_POINT_IDS),
        ];
        for ((ex, ey), spread, ids) in eyes {
            // Eyelid points on an ellipse; semi-minor axis is half the
            // vertical spread, and 16 samples hit both vertical extremes.
            let a = f64::from(self.iris_radius) * 1.8;
            let b = f64::from(spread) / 2.0;
            for (k, &id) in ids.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let angle = std::f64::consts::TAU * k as f64 / ids.len() as f64;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let px = (f64::from(ex) + a * angle.cos()).round() as u32;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let py = (f64::from(ey) + b * angle.sin()).round() as u32;
                points[id as usize] = norm(px, py);
            }
        }

        let contours = FaceContours::face_mesh();
        for (center, iris) in [
            (self.right_eye, contours.right_iris),
            (self.left_eye, contours.left_iris),
        ] {
            let r = self.iris_radius;
            // Leftmost, topmost, bottommost, rightmost.
            points[iris[0] as usize] = norm(center.0 - r, center.1);
            points[iris[1] as usize] = norm(center.0, center.1 - r);
            points[iris[2] as usize] = norm(center.0, center.1 + r);
            points[iris[3] as usize] = norm(center.0 + r, center.1);
        }

        FaceLandmarks::new(points, contours)
    }
}
