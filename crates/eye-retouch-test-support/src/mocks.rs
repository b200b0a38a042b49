//! Mock implementations of the core port traits.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::bail;
use eye_retouch_core::domain::{FaceLandmarks, RelativeBox};
use eye_retouch_core::ports::{FaceBoxDetector, ImageCodec, LandmarkDetector};
use image::RgbImage;

/// Mock landmark detector with scripted per-call responses.
///
/// Responses are consumed front to back; once the script is exhausted the
/// fallback response is returned. Tracks the call count for assertions.
pub struct MockLandmarkDetector {
    script: Mutex<VecDeque<Option<FaceLandmarks>>>,
    fallback: Option<FaceLandmarks>,
    calls: Mutex<usize>,
}

impl MockLandmarkDetector {
    /// Detector that always returns the same result.
    #[must_use]
    pub fn always(result: Option<FaceLandmarks>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: result,
            calls: Mutex::new(0),
        }
    }

    /// Detector that never finds a face.
    #[must_use]
    pub fn no_face() -> Self {
        Self::always(None)
    }

    /// Detector that plays back the given responses in order, then returns
    /// no face.
    #[must_use]
    pub fn scripted(responses: Vec<Option<FaceLandmarks>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback: None,
            calls: Mutex::new(0),
        }
    }

    /// Number of detection calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LandmarkDetector for MockLandmarkDetector {
    fn detect(&self, _image: &RgbImage) -> anyhow::Result<Option<FaceLandmarks>> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Ok(match next {
            Some(response) => response,
            None => self.fallback.clone(),
        })
    }
}

/// Mock face-box detector returning a fixed set of boxes.
pub struct MockFaceBoxDetector {
    boxes: Vec<RelativeBox>,
    calls: Mutex<usize>,
}

impl MockFaceBoxDetector {
    /// Detector returning the given boxes on every call.
    #[must_use]
    pub fn new(boxes: Vec<RelativeBox>) -> Self {
        Self {
            boxes,
            calls: Mutex::new(0),
        }
    }

    /// Detector that never finds a face.
    #[must_use]
    pub fn no_face() -> Self {
        Self::new(vec![])
    }

    /// Number of detection calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceBoxDetector for MockFaceBoxDetector {
    fn detect(&self, _image: &RgbImage) -> anyhow::Result<Vec<RelativeBox>> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(self.boxes.clone())
    }
}

/// Mock image codec serving images from an in-memory map.
#[derive(Default)]
pub struct MockImageCodec {
    images: HashMap<PathBuf, RgbImage>,
}

impl MockImageCodec {
    /// Empty codec; every load fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under a path.
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, image: RgbImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }
}

impl ImageCodec for MockImageCodec {
    fn load(&self, path: &Path) -> anyhow::Result<RgbImage> {
        match self.images.get(path) {
            Some(image) => Ok(image.clone()),
            None => bail!("no image registered at {}", path.display()),
        }
    }
}
