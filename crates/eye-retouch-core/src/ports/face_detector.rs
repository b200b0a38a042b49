//! Face-box detector port.

use image::RgbImage;

use crate::domain::RelativeBox;

/// Port for the external face bounding-box detector.
pub trait FaceBoxDetector: Send + Sync {
    /// Detects faces, returning zero or more relative bounding boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector itself fails.
    fn detect(&self, image: &RgbImage) -> anyhow::Result<Vec<RelativeBox>>;
}
