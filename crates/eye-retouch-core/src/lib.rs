//! Eye Retouch Core - Domain logic and edit pipeline
//!
//! This crate contains the core domain types, detector/codec ports, and the
//! pixel-level pipelines for iris recoloring and radial eye-resize warping.

pub mod domain;
pub mod editor;
pub mod imaging;
pub mod modules;
pub mod ports;

pub use domain::{
    CropRect, EditError, EyeSide, EyeValue, FaceContours, FaceLandmarks, NormPoint, Patch,
    Portrait, RecolorRequest, RelativeBox, ResizeRequest,
};
pub use editor::Editor;
pub use ports::{FaceBoxDetector, ImageCodec, LandmarkDetector};
