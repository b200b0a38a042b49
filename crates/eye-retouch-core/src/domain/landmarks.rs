//! Landmark set produced by the external face-mesh detector.

use serde::{Deserialize, Serialize};

use super::{EditError, EyeSide};

/// Eyelid contour edges of the right eye in the 468-point face-mesh topology.
const FACE_MESH_RIGHT_EYE: [[u32; 2]; 16] = [
    [33, 7],
    [7, 163],
    [163, 144],
    [144, 145],
    [145, 153],
    [153, 154],
    [154, 155],
    [155, 133],
    [33, 246],
    [246, 161],
    [161, 160],
    [160, 159],
    [159, 158],
    [158, 157],
    [157, 173],
    [173, 133],
];

/// Eyelid contour edges of the left eye in the 468-point face-mesh topology.
const FACE_MESH_LEFT_EYE: [[u32; 2]; 16] = [
    [263, 249],
    [249, 390],
    [390, 373],
    [373, 374],
    [374, 380],
    [380, 381],
    [381, 382],
    [382, 362],
    [263, 466],
    [466, 388],
    [388, 387],
    [387, 386],
    [386, 385],
    [385, 384],
    [384, 398],
    [398, 362],
];

/// Right iris extreme points, ordered leftmost/topmost/bottommost/rightmost.
const FACE_MESH_RIGHT_IRIS: [u32; 4] = [471, 470, 472, 469];

/// Left iris extreme points, ordered leftmost/topmost/bottommost/rightmost.
const FACE_MESH_LEFT_IRIS: [u32; 4] = [476, 475, 477, 474];

/// A single landmark in normalized `[0,1]` image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    /// Horizontal coordinate, normalized.
    pub x: f32,
    /// Vertical coordinate, normalized.
    pub y: f32,
}

/// Named semantic landmark groups.
///
/// Eyelid contours are edge lists (index pairs into the point sequence);
/// iris contours are the four extreme points of each iris, ordered
/// leftmost/topmost/bottommost/rightmost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceContours {
    /// Right eyelid contour edges.
    pub right_eye: Vec<[u32; 2]>,
    /// Left eyelid contour edges.
    pub left_eye: Vec<[u32; 2]>,
    /// Right iris extreme points.
    pub right_iris: [u32; 4],
    /// Left iris extreme points.
    pub left_iris: [u32; 4],
}

impl FaceContours {
    /// Contour groups of the standard 468+10-point face-mesh topology
    /// (iris refinement points 468..478).
    #[must_use]
    pub fn face_mesh() -> Self {
        Self {
            right_eye: FACE_MESH_RIGHT_EYE.to_vec(),
            left_eye: FACE_MESH_LEFT_EYE.to_vec(),
            right_iris: FACE_MESH_RIGHT_IRIS,
            left_iris: FACE_MESH_LEFT_IRIS,
        }
    }

    /// The eyelid contour edges of one eye.
    #[must_use]
    pub fn eyelid(&self, side: EyeSide) -> &[[u32; 2]] {
        match side {
            EyeSide::Right => &self.right_eye,
            EyeSide::Left => &self.left_eye,
        }
    }

    /// The iris extreme points of one eye.
    #[must_use]
    pub const fn iris(&self, side: EyeSide) -> &[u32; 4] {
        match side {
            EyeSide::Right => &self.right_iris,
            EyeSide::Left => &self.left_iris,
        }
    }
}

/// Landmark set for a single detected face.
///
/// Produced once per detection call and consumed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<NormPoint>,
    contours: FaceContours,
}

impl FaceLandmarks {
    /// Creates a landmark set from detector output.
    #[must_use]
    pub const fn new(points: Vec<NormPoint>, contours: FaceContours) -> Self {
        Self { points, contours }
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The contour groups of this set.
    #[must_use]
    pub const fn contours(&self) -> &FaceContours {
        &self.contours
    }

    /// Looks up a point by contour index.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::LandmarkGeometry`] if the index is outside the
    /// point sequence, which means the contour groups do not match the
    /// detector's topology.
    pub fn point(&self, index: u32) -> Result<NormPoint, EditError> {
        self.points.get(index as usize).copied().ok_or_else(|| {
            EditError::LandmarkGeometry(format!(
                "contour references landmark {index} but detector produced {} points",
                self.points.len()
            ))
        })
    }
}
