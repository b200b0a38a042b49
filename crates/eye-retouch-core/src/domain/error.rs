//! Error taxonomy for the edit pipeline.

use thiserror::Error;

/// Errors surfaced by an apply-call.
///
/// `NoFaceDetected` is checked before any pixel mutation, so a call failing
/// with it leaves the portrait buffer byte-identical.
#[derive(Debug, Error)]
pub enum EditError {
    /// The detector returned no face or no landmarks.
    #[error("no face detected in image \"{path}\"")]
    NoFaceDetected {
        /// Path of the image that was processed.
        path: String,
    },

    /// Landmark geometry does not match the expected contour arrangement
    /// (e.g. a degenerate iris crop rectangle).
    #[error("landmark geometry violated: {0}")]
    LandmarkGeometry(String),

    /// A request parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The face or landmark detector itself failed.
    #[error("detector failure")]
    Detector(#[source] anyhow::Error),

    /// The image codec failed to load a source image.
    #[error("failed to load image")]
    Codec(#[source] anyhow::Error),
}
