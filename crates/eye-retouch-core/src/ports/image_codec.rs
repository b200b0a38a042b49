//! Image codec port.

use std::path::Path;

use image::RgbImage;

/// Port for loading source images.
///
/// Implementations must normalize channel order to canonical RGB before
/// returning, since codec and detector conventions may differ.
pub trait ImageCodec: Send + Sync {
    /// Decodes the image at `path` into an 8-bit RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    fn load(&self, path: &Path) -> anyhow::Result<RgbImage>;
}
