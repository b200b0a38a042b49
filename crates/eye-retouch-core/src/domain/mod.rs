//! Core domain types for portrait eye editing.

mod error;
mod geometry;
mod landmarks;
mod portrait;
mod request;

pub use error::EditError;
pub use geometry::{norm_to_pixel, CropRect, RelativeBox};
pub use landmarks::{FaceContours, FaceLandmarks, NormPoint};
pub use portrait::{Patch, Portrait};
pub use request::{EyeSide, EyeValue, RecolorRequest, ResizeRequest};
