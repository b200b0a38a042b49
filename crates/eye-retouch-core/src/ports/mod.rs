//! Port definitions for hexagonal architecture.
//!
//! These traits are the boundary between the edit pipeline and its external
//! collaborators: the face-box detector, the landmark estimator, and the
//! image codec. All three are opaque services to the core.

mod face_detector;
mod image_codec;
mod landmark_detector;

pub use face_detector::FaceBoxDetector;
pub use image_codec::ImageCodec;
pub use landmark_detector::LandmarkDetector;
