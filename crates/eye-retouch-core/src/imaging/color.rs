//! RGB <-> HSV conversion on 8-bit channels.
//!
//! Uses the OpenCV 8-bit convention: hue in `[0,180)` (degrees halved),
//! saturation and value in `[0,255]`. Hue parameters elsewhere in the crate
//! follow the same scale.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

/// Converts one RGB pixel to `(hue, saturation, value)`.
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = f32::from(max) - f32::from(min);

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (255.0 * diff / f32::from(max)).round() as u8
    };

    if diff == 0.0 {
        return (0, s, v);
    }

    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let mut h = if max == r {
        60.0 * (gf - bf) / diff
    } else if max == g {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    // Halve to fit the 0..180 range of an 8-bit channel.
    (((h / 2.0).round() as u32 % 180) as u8, s, v)
}

/// Converts one `(hue, saturation, value)` triple back to RGB.
#[must_use]
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> (u8, u8, u8) {
    if s == 0 {
        return (v, v, v);
    }

    let h = f32::from(h) * 2.0;
    let s = f32::from(s) / 255.0;
    let v = f32::from(v);

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = v - c;

    let (rf, gf, bf) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        (rf + m).round() as u8,
        (gf + m).round() as u8,
        (bf + m).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn test_grays_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 255));
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(0, 255, 255), (255, 0, 0));
        assert_eq!(hsv_to_rgb(60, 255, 255), (0, 255, 0));
        assert_eq!(hsv_to_rgb(120, 255, 255), (0, 0, 255));
    }

    #[test]
    fn test_round_trip_tolerance() {
        for &(r, g, b) in &[(60u8, 40u8, 30u8), (200, 180, 160), (10, 90, 200)] {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r2, g2, b2) = hsv_to_rgb(h, s, v);
            assert!(i16::from(r).abs_diff(i16::from(r2)) <= 3);
            assert!(i16::from(g).abs_diff(i16::from(g2)) <= 3);
            assert!(i16::from(b).abs_diff(i16::from(b2)) <= 3);
        }
    }
}
