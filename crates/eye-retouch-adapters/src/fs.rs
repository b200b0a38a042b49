//! Filesystem adapter for loading portrait images.

use std::path::Path;

use anyhow::{bail, Context, Result};
use eye_retouch_core::ports::ImageCodec;
use image::RgbImage;
use tracing::debug;

/// Supported raster extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp"];

/// Filesystem image codec.
///
/// Decodes through the `image` crate and converts every source to 8-bit
/// RGB, so downstream stages always see canonical channel order regardless
/// of the container format.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageCodec;

impl FsImageCodec {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ImageCodec for FsImageCodec {
    fn load(&self, path: &Path) -> Result<RgbImage> {
        if !is_supported_image(path) {
            bail!("unsupported file type: {}", path.display());
        }

        let image = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        debug!(path = %path.display(), color = ?image.color(), "image loaded");

        Ok(image.to_rgb8())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("portrait.JPG")));
        assert!(is_supported_image(Path::new("portrait.png")));
        assert!(!is_supported_image(Path::new("portrait.txt")));
        assert!(!is_supported_image(Path::new("portrait")));
    }
}
