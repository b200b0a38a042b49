//! Per-call edit requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which eye a value or region belongs to, in image coordinates
/// (the subject's right eye appears on the image's left side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeSide {
    /// The subject's right eye.
    Right,
    /// The subject's left eye.
    Left,
}

impl EyeSide {
    /// Both sides, right first.
    pub const BOTH: [Self; 2] = [Self::Right, Self::Left];
}

/// A parameter applied to both eyes or resolved per eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeValue<T: Copy> {
    /// One value for both eyes.
    Both(T),
    /// Independent per-eye values.
    PerEye {
        /// Value for the subject's right eye.
        right: T,
        /// Value for the subject's left eye.
        left: T,
    },
}

impl<T: Copy> EyeValue<T> {
    /// Resolves the value for one eye.
    #[must_use]
    pub const fn for_side(&self, side: EyeSide) -> T {
        match (self, side) {
            (Self::Both(v), _) => *v,
            (Self::PerEye { right, .. }, EyeSide::Right) => *right,
            (Self::PerEye { left, .. }, EyeSide::Left) => *left,
        }
    }
}

/// Immutable request for one iris-recolor apply-call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecolorRequest {
    /// Target hue, OpenCV-style `[0,180)` scale.
    pub color: EyeValue<u8>,
    /// Signed saturation delta; the result is clamped to `[0,255]`.
    pub saturation: EyeValue<i16>,
    /// Optional source override; reloads the image and resets the snapshot.
    pub source: Option<PathBuf>,
}

impl RecolorRequest {
    /// Request applying one hue and saturation delta to both eyes.
    #[must_use]
    pub const fn new(color: u8, saturation: i16) -> Self {
        Self {
            color: EyeValue::Both(color),
            saturation: EyeValue::Both(saturation),
            source: None,
        }
    }
}

/// Immutable request for one eye-resize apply-call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeRequest {
    /// Power exponent of the radial warp; values above 1 enlarge the eyes.
    pub size: f32,
    /// Optional warp radius override in pixels.
    pub radius: Option<u32>,
    /// Optional source override; reloads the image and resets the snapshot.
    pub source: Option<PathBuf>,
}

impl ResizeRequest {
    /// Request resizing both eyes with the given power exponent.
    #[must_use]
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            radius: None,
            source: None,
        }
    }
}

impl Default for ResizeRequest {
    fn default() -> Self {
        Self::new(1.25)
    }
}
