//! The public edit surface: one loaded portrait, two apply operations.

use std::path::Path;

use tracing::debug;

use crate::domain::{
    EditError, EyeSide, Patch, Portrait, RecolorRequest, ResizeRequest,
};
use crate::modules::{eye_state, iris, locate, warp};
use crate::ports::{FaceBoxDetector, ImageCodec, LandmarkDetector};

/// Warp radius for images smaller than [`RADIUS_DIMENSION_CUTOFF`].
const SMALL_IMAGE_RADIUS: u32 = 50;

/// Warp radius for images at least [`RADIUS_DIMENSION_CUTOFF`] on both axes.
const LARGE_IMAGE_RADIUS: u32 = 160;

/// Dimension cutoff between the two default radii.
const RADIUS_DIMENSION_CUTOFF: u32 = 1000;

/// Cosmetic eye editor over a single loaded portrait.
///
/// Each apply-call runs a complete, independent pipeline; the only state
/// carried between calls is the loaded image (with its pre-edit snapshot)
/// and the last explicitly requested warp radius. `&mut self` receivers
/// make concurrent calls on one instance impossible; batch callers use one
/// editor per image.
pub struct Editor<C, F, L> {
    codec: C,
    face_detector: F,
    landmark_detector: L,
    portrait: Portrait,
    openness_threshold: u32,
    radius_override: Option<u32>,
}

impl<C, F, L> Editor<C, F, L>
where
    C: ImageCodec,
    F: FaceBoxDetector,
    L: LandmarkDetector,
{
    /// Loads the portrait at `path` and wires up the collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Codec`] if the image cannot be loaded.
    pub fn open(
        codec: C,
        face_detector: F,
        landmark_detector: L,
        path: impl AsRef<Path>,
    ) -> Result<Self, EditError> {
        let path = path.as_ref();
        let image = codec.load(path).map_err(EditError::Codec)?;
        Ok(Self {
            codec,
            face_detector,
            landmark_detector,
            portrait: Portrait::new(path.to_string_lossy(), image),
            openness_threshold: eye_state::DEFAULT_OPENNESS_THRESHOLD,
            radius_override: None,
        })
    }

    /// Replaces the loaded image and its snapshot with a new source.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Codec`] if the new image cannot be loaded; the
    /// previous portrait stays loaded in that case.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let image = self.codec.load(path).map_err(EditError::Codec)?;
        self.portrait = Portrait::new(path.to_string_lossy(), image);
        Ok(())
    }

    /// The current (possibly edited) pixel buffer.
    #[must_use]
    pub fn portrait(&self) -> &image::RgbImage {
        self.portrait.image()
    }

    /// The pre-edit snapshot of the current source.
    #[must_use]
    pub fn original(&self) -> &image::RgbImage {
        self.portrait.original()
    }

    /// Recolors the iris of every open eye.
    ///
    /// # Errors
    ///
    /// - [`EditError::InvalidParameter`] for hues outside `[0,180)`.
    /// - [`EditError::NoFaceDetected`] if the landmark pass finds no face;
    ///   checked before any mutation, the buffer stays byte-identical.
    /// - [`EditError::LandmarkGeometry`] for degenerate iris contours.
    pub fn apply_recolor(&mut self, req: &RecolorRequest) -> Result<(), EditError> {
        for side in EyeSide::BOTH {
            let hue = req.color.for_side(side);
            if hue >= 180 {
                return Err(EditError::InvalidParameter(format!(
                    "hue {hue} for {side:?} eye is outside [0,180)"
                )));
            }
        }

        if let Some(path) = &req.source {
            self.reload(path)?;
        }

        let landmarks = self
            .landmark_detector
            .detect(self.portrait.image())
            .map_err(EditError::Detector)?
            .filter(|lm| !lm.is_empty())
            .ok_or_else(|| EditError::NoFaceDetected {
                path: self.portrait.path().to_owned(),
            })?;

        let openness = eye_state::classify(
            &landmarks,
            self.portrait.width(),
            self.portrait.height(),
            self.openness_threshold,
        )?;
        debug!(?openness, "recolor pass");

        let mut patches = Vec::new();
        for side in EyeSide::BOTH {
            if let Some(region) =
                iris::build_region(self.portrait.image(), &landmarks, side, &openness)?
            {
                patches.push(iris::recolor(
                    &region,
                    req.color.for_side(side),
                    req.saturation.for_side(side),
                ));
            }
        }

        self.portrait.commit(patches);
        Ok(())
    }

    /// Enlarges or shrinks the eyes of every detected face.
    ///
    /// # Errors
    ///
    /// - [`EditError::InvalidParameter`] for a non-finite or non-positive
    ///   size factor, or a zero radius.
    /// - [`EditError::NoFaceDetected`] if either detection stage finds no
    ///   face; checked before any mutation.
    /// - [`EditError::LandmarkGeometry`] for degenerate face boxes or
    ///   eyelid contours.
    pub fn apply_resize(&mut self, req: &ResizeRequest) -> Result<(), EditError> {
        if !req.size.is_finite() || req.size <= 0.0 {
            return Err(EditError::InvalidParameter(format!(
                "size factor {} must be finite and positive",
                req.size
            )));
        }
        if req.radius == Some(0) {
            return Err(EditError::InvalidParameter(
                "warp radius must be non-zero".to_owned(),
            ));
        }

        if let Some(path) = &req.source {
            self.reload(path)?;
        }
        if req.radius.is_some() {
            self.radius_override = req.radius;
        }
        let radius = self.radius_override.unwrap_or_else(|| {
            default_radius(self.portrait.width(), self.portrait.height())
        });

        let boxes = self
            .face_detector
            .detect(self.portrait.image())
            .map_err(EditError::Detector)?;
        if boxes.is_empty() {
            return Err(EditError::NoFaceDetected {
                path: self.portrait.path().to_owned(),
            });
        }

        let mut patches = Vec::new();
        for rbox in &boxes {
            let rect = locate::face_rect(rbox, self.portrait.width(), self.portrait.height())?;
            let crop = self.portrait.crop(rect);

            // Second, localized landmark pass over the face crop for more
            // accurate eye centers.
            let landmarks = self
                .landmark_detector
                .detect(&crop)
                .map_err(EditError::Detector)?
                .filter(|lm| !lm.is_empty())
                .ok_or_else(|| EditError::NoFaceDetected {
                    path: self.portrait.path().to_owned(),
                })?;
            let centers = locate::eye_centers(&landmarks, rect.width, rect.height)?;

            let mut field = warp::WarpField::identity(rect.width, rect.height);
            field.stamp_eye(centers.right, radius, req.size);
            field.stamp_eye(centers.left, radius, req.size);
            field.smooth_around(centers.right, radius, warp::DEFAULT_MARGIN);
            field.smooth_around(centers.left, radius, warp::DEFAULT_MARGIN);

            debug!(?rect, radius, size = req.size, "resize pass");
            patches.push(Patch {
                rect,
                pixels: warp::resample(&crop, &field),
            });
        }

        self.portrait.commit(patches);
        Ok(())
    }
}

/// Default warp radius from the image dimensions.
const fn default_radius(width: u32, height: u32) -> u32 {
    if width < RADIUS_DIMENSION_CUTOFF || height < RADIUS_DIMENSION_CUTOFF {
        SMALL_IMAGE_RADIUS
    } else {
        LARGE_IMAGE_RADIUS
    }
}
