//! The mutable portrait buffer and its patch-commit protocol.

use image::RgbImage;

use super::CropRect;

/// A computed edit: pixel data destined for one crop rectangle.
///
/// Patches are pure function outputs; nothing is written to the portrait
/// until [`Portrait::commit`] is called, so a pipeline failure before the
/// commit step leaves the buffer untouched.
#[derive(Debug, Clone)]
pub struct Patch {
    /// Destination rectangle in the portrait.
    pub rect: CropRect,
    /// Replacement pixels, same shape as `rect`.
    pub pixels: RgbImage,
}

/// The single mutable pixel buffer plus its immutable pre-edit snapshot.
#[derive(Debug, Clone)]
pub struct Portrait {
    path: String,
    image: RgbImage,
    original: RgbImage,
}

impl Portrait {
    /// Wraps a decoded image, retaining a snapshot for comparison.
    #[must_use]
    pub fn new(path: impl Into<String>, image: RgbImage) -> Self {
        let original = image.clone();
        Self {
            path: path.into(),
            image,
            original,
        }
    }

    /// Source path of the image.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The current (possibly edited) pixel buffer.
    #[must_use]
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// The pre-edit snapshot.
    #[must_use]
    pub const fn original(&self) -> &RgbImage {
        &self.original
    }

    /// Copies a crop rectangle out of the current buffer.
    #[must_use]
    pub fn crop(&self, rect: CropRect) -> RgbImage {
        image::imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height).to_image()
    }

    /// Writes patches into the buffer, in order.
    ///
    /// The pipeline never produces a patch whose pixel data does not match
    /// its rectangle shape; debug builds assert on one, release builds skip
    /// it rather than corrupt the buffer.
    pub fn commit(&mut self, patches: impl IntoIterator<Item = Patch>) {
        for patch in patches {
            debug_assert_eq!(
                patch.pixels.dimensions(),
                (patch.rect.width, patch.rect.height),
                "patch pixels must match the rect shape"
            );
            if patch.pixels.dimensions() != (patch.rect.width, patch.rect.height) {
                continue;
            }
            image::imageops::replace(
                &mut self.image,
                &patch.pixels,
                i64::from(patch.rect.x),
                i64::from(patch.rect.y),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_snapshot_is_retained() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let mut portrait = Portrait::new("test.png", img);

        let patch = Patch {
            rect: CropRect { x: 1, y: 1, width: 2, height: 2 },
            pixels: RgbImage::from_pixel(2, 2, Rgb([200, 0, 0])),
        };
        portrait.commit([patch]);

        assert_eq!(portrait.image().get_pixel(1, 1), &Rgb([200, 0, 0]));
        assert_eq!(portrait.original().get_pixel(1, 1), &Rgb([10, 20, 30]));
        // Pixels outside the patch rectangle stay untouched.
        assert_eq!(portrait.image().get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(portrait.image().get_pixel(3, 3), &Rgb([10, 20, 30]));
    }

    #[test]
    #[should_panic(expected = "patch pixels must match the rect shape")]
    fn test_mismatched_patch_is_asserted() {
        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let mut portrait = Portrait::new("test.png", img);

        let patch = Patch {
            rect: CropRect { x: 0, y: 0, width: 3, height: 3 },
            pixels: RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])),
        };
        portrait.commit([patch]);
    }
}
