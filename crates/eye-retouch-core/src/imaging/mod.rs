//! Low-level pixel helpers shared by the pipeline modules.

mod color;
mod mask;

pub use color::{hsv_to_rgb, rgb_to_hsv};
pub use mask::{ellipse_element, intersect};
