//! Radial warp-field construction, seam smoothing, and resampling.
//!
//! A warp field is a pair of `f32` coordinate maps over the face crop:
//! for every output pixel they give the source column and row to sample.
//! Both eyes are stamped into one shared field and the crop is resampled
//! in a single bicubic pass, so the result does not depend on eye order.

use image::{ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

/// Real-valued coordinate map, same shape as the face crop.
pub type CoordMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Default power exponent; values above 1 enlarge the eye.
pub const DEFAULT_POWER: f32 = 1.25;

/// Default padding around the warp disk for seam smoothing, in pixels.
pub const DEFAULT_MARGIN: u32 = 10;

/// Gaussian sigma of the seam blur, equivalent to a 5x5 kernel.
const SEAM_SIGMA: f32 = 1.1;

/// Per-pixel displacement maps for a face crop.
#[derive(Debug, Clone)]
pub struct WarpField {
    map_x: CoordMap,
    map_y: CoordMap,
}

impl WarpField {
    /// Identity field: every output pixel samples itself.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            map_x: CoordMap::from_fn(width, height, |x, _| Luma([x as f32])),
            map_y: CoordMap::from_fn(width, height, |_, y| Luma([y as f32])),
        }
    }

    /// Field width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.map_x.width()
    }

    /// Field height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.map_x.height()
    }

    /// Source coordinate sampled for the output pixel `(x, y)`.
    #[must_use]
    pub fn source_at(&self, x: u32, y: u32) -> (f32, f32) {
        (self.map_x.get_pixel(x, y).0[0], self.map_y.get_pixel(x, y).0[0])
    }

    /// Stamps one eye's radial power-law transform into the field.
    ///
    /// Every integer offset `(di, dj)` with `di^2 + dj^2 <= radius^2` gets
    /// its source row replaced by `cy ± (|di|/radius)^power * radius` and
    /// its source column by `cx ± (|dj|/radius)^power * radius`, signs
    /// matching the offsets. Cells on the axis lines (`di == 0` or
    /// `dj == 0`) keep the identity for that map. Where two stamps overlap
    /// (close-set eyes), the later stamp wins.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn stamp_eye(&mut self, center: (u32, u32), radius: u32, power: f32) {
        let (width, height) = (self.width(), self.height());
        let (cx, cy) = (i64::from(center.0), i64::from(center.1));
        let r = (radius.max(1)) as f32;
        let ri = i64::from(radius);

        debug!(?center, radius, power, "stamping eye warp");

        for di in -ri..=ri {
            for dj in -ri..=ri {
                if di * di + dj * dj > ri * ri {
                    continue;
                }
                let y = cy + di;
                let x = cx + dj;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    continue;
                }
                let (x, y) = (x as u32, y as u32);

                if di != 0 {
                    let mag = (di.unsigned_abs() as f32 / r).powf(power) * r;
                    let sign = if di > 0 { 1.0 } else { -1.0 };
                    self.map_y.put_pixel(x, y, Luma([cy as f32 + sign * mag]));
                }
                if dj != 0 {
                    let mag = (dj.unsigned_abs() as f32 / r).powf(power) * r;
                    let sign = if dj > 0 { 1.0 } else { -1.0 };
                    self.map_x.put_pixel(x, y, Luma([cx as f32 + sign * mag]));
                }
            }
        }
    }

    /// Blurs both maps inside a `radius + margin` window around the eye to
    /// remove the seam where the warp disk transitions back to identity.
    pub fn smooth_around(&mut self, center: (u32, u32), radius: u32, margin: u32) {
        let reach = i64::from(radius) + i64::from(margin);
        let (cx, cy) = (i64::from(center.0), i64::from(center.1));

        let x0 = (cx - reach).max(0);
        let y0 = (cy - reach).max(0);
        let x1 = (cx + reach + 1).min(i64::from(self.width()));
        let y1 = (cy + reach + 1).min(i64::from(self.height()));
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x0, y0, w, h) = (x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32);

        for map in [&mut self.map_x, &mut self.map_y] {
            let window = image::imageops::crop_imm(map, x0, y0, w, h).to_image();
            let blurred = gaussian_blur_f32(&window, SEAM_SIGMA);
            image::imageops::replace(map, &blurred, i64::from(x0), i64::from(y0));
        }
    }
}

/// Resamples the face crop through the field with bicubic interpolation.
///
/// Source coordinates and the interpolation window are clamped into the
/// crop, replicating border pixels. An identity-mapped cell therefore comes
/// back with its input pixel exactly, including at the crop edges.
#[must_use]
pub fn resample(crop: &RgbImage, field: &WarpField) -> RgbImage {
    debug_assert_eq!(crop.dimensions(), (field.width(), field.height()));

    RgbImage::from_fn(field.width(), field.height(), |x, y| {
        let (sx, sy) = field.source_at(x, y);
        sample_bicubic(crop, sx, sy)
    })
}

/// Bicubic sample at a real-valued coordinate, taps clamped into bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn sample_bicubic(image: &RgbImage, sx: f32, sy: f32) -> Rgb<u8> {
    let max_x = i64::from(image.width().saturating_sub(1));
    let max_y = i64::from(image.height().saturating_sub(1));

    let x0 = sx.floor();
    let y0 = sy.floor();
    let wx = cubic_weights(sx - x0);
    let wy = cubic_weights(sy - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f32; 3];
    for (j, weight_y) in wy.iter().enumerate() {
        let py = (y0 + j as i64 - 1).clamp(0, max_y) as u32;
        for (i, weight_x) in wx.iter().enumerate() {
            let px = (x0 + i as i64 - 1).clamp(0, max_x) as u32;
            let weight = weight_x * weight_y;
            let pixel = image.get_pixel(px, py);
            for (sum, &channel) in acc.iter_mut().zip(pixel.0.iter()) {
                *sum += weight * f32::from(channel);
            }
        }
    }

    Rgb([
        acc[0].round().clamp(0.0, 255.0) as u8,
        acc[1].round().clamp(0.0, 255.0) as u8,
        acc[2].round().clamp(0.0, 255.0) as u8,
    ])
}

/// Keys cubic kernel weights (a = -0.5) for the four taps around a sample
/// with fractional offset `f`. The weights sum to 1; at `f == 0` all weight
/// lands on the center tap, so integer coordinates reproduce their pixel.
fn cubic_weights(f: f32) -> [f32; 4] {
    let kernel = |t: f32| {
        let t = t.abs();
        if t <= 1.0 {
            (1.5 * t - 2.5) * t * t + 1.0
        } else if t < 2.0 {
            ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
        } else {
            0.0
        }
    };
    [kernel(f + 1.0), kernel(f), kernel(1.0 - f), kernel(2.0 - f)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_field_samples_itself() {
        let field = WarpField::identity(8, 6);
        for y in 0..6 {
            for x in 0..8 {
                #[allow(clippy::cast_precision_loss)]
                let expected = (x as f32, y as f32);
                assert_eq!(field.source_at(x, y), expected);
            }
        }
    }

    #[test]
    fn test_cells_outside_radius_keep_identity() {
        let mut field = WarpField::identity(60, 60);
        field.stamp_eye((30, 30), 10, 1.25);

        for y in 0..60u32 {
            for x in 0..60u32 {
                let di = i64::from(y) - 30;
                let dj = i64::from(x) - 30;
                if di * di + dj * dj > 100 {
                    #[allow(clippy::cast_precision_loss)]
                    let expected = (x as f32, y as f32);
                    assert_eq!(field.source_at(x, y), expected, "at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_power_above_one_pulls_samples_toward_center() {
        let mut field = WarpField::identity(60, 60);
        field.stamp_eye((30, 30), 10, 2.0);

        // Offset (di, dj) = (5, 0): source row should be 30 + (0.5^2)*10.
        let (sx, sy) = field.source_at(30, 35);
        assert!((sy - 32.5).abs() < 1e-4);
        assert!((sx - 30.0).abs() < 1e-4);

        // Negative side mirrors.
        let (_, sy) = field.source_at(30, 25);
        assert!((sy - 27.5).abs() < 1e-4);
    }

    #[test]
    fn test_stamp_near_border_is_clipped() {
        let mut field = WarpField::identity(20, 20);
        field.stamp_eye((1, 1), 10, 1.25);
        // Does not panic; in-bounds cells are written.
        let (sx, _) = field.source_at(5, 1);
        assert!(sx > 1.0);
    }

    #[test]
    fn test_smoothing_leaves_outside_window_untouched() {
        let mut field = WarpField::identity(80, 80);
        field.stamp_eye((40, 40), 10, 1.25);
        field.smooth_around((40, 40), 10, 10);

        // Window spans 20..=60 in both axes; outside it the field is still
        // the untouched identity.
        for &(x, y) in &[(0u32, 0u32), (79, 79), (10, 40), (40, 70)] {
            #[allow(clippy::cast_precision_loss)]
            let expected = (x as f32, y as f32);
            assert_eq!(field.source_at(x, y), expected);
        }
    }

    #[test]
    fn test_resample_identity_is_lossless() {
        let crop = RgbImage::from_fn(16, 16, |x, y| {
            let (r, g) = ((x * 16) % 256, (y * 16) % 256);
            Rgb([u8::try_from(r).unwrap(), u8::try_from(g).unwrap(), 77])
        });
        let field = WarpField::identity(16, 16);
        let out = resample(&crop, &field);
        assert_eq!(out.as_raw(), crop.as_raw());
    }

    #[test]
    fn test_resample_replicates_borders_instead_of_filling() {
        // No black anywhere in the crop; a warp clipped against the border
        // must never introduce fill pixels, only replicated edge content.
        let crop = RgbImage::from_fn(20, 20, |x, y| {
            Rgb([
                u8::try_from(50 + x * 10).unwrap(),
                u8::try_from(50 + y * 10).unwrap(),
                90,
            ])
        });
        let mut field = WarpField::identity(20, 20);
        field.stamp_eye((1, 1), 10, 1.5);

        let out = resample(&crop, &field);
        for (x, y, pixel) in out.enumerate_pixels() {
            assert_ne!(pixel, &Rgb([0, 0, 0]), "fill pixel at ({x},{y})");
        }
        // The identity-mapped far corner is untouched.
        assert_eq!(out.get_pixel(19, 19), crop.get_pixel(19, 19));
    }

    #[test]
    fn test_cubic_weights_partition_unity() {
        for &f in &[0.0f32, 0.25, 0.5, 0.9] {
            let sum: f32 = cubic_weights(f).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "weights for {f} sum to {sum}");
        }
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resample_changes_pixels_inside_disk_only() {
        let crop = RgbImage::from_fn(64, 64, |x, y| {
            let (r, g, b) = ((x * 4) % 256, (y * 4) % 256, ((x + y) * 2) % 256);
            Rgb([
                u8::try_from(r).unwrap(),
                u8::try_from(g).unwrap(),
                u8::try_from(b).unwrap(),
            ])
        });
        let mut field = WarpField::identity(64, 64);
        field.stamp_eye((32, 32), 8, 1.5);

        let out = resample(&crop, &field);
        for (x, y, pixel) in out.enumerate_pixels() {
            let di = i64::from(y) - 32;
            let dj = i64::from(x) - 32;
            if di * di + dj * dj > 64 {
                assert_eq!(pixel, crop.get_pixel(x, y), "at ({x},{y})");
            }
        }
    }
}
