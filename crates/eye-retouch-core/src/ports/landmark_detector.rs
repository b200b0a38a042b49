//! Landmark detector port.

use image::RgbImage;

use crate::domain::FaceLandmarks;

/// Port for the external face-mesh landmark estimator.
pub trait LandmarkDetector: Send + Sync {
    /// Runs landmark detection on an image.
    ///
    /// Returns `None` when no face is found. The returned set carries at
    /// least the eyelid and iris contour groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector itself fails.
    fn detect(&self, image: &RgbImage) -> anyhow::Result<Option<FaceLandmarks>>;
}
