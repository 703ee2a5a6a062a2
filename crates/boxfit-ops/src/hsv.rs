//! Floating-point RGB ⇄ HSV conversion.
//!
//! Conventions for `f32` images:
//!
//! | Channel | Range                                   |
//! |---------|-----------------------------------------|
//! | H       | degrees, `[0, 360)`                     |
//! | S       | `[0, 1]`                                |
//! | V       | `max(R, G, B)`, same scale as the input |
//!
//! Because V keeps the input's scale, an image stored as `0..255` floats
//! yields V in `0..255` and an image stored as `0..1` yields V in `0..1`.
//!
//! ```rust
//! use boxfit_ops::hsv::{hsv_to_rgb, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv([0.0, 255.0, 0.0]);
//! assert_eq!(hsv, [120.0, 1.0, 255.0]);
//! let rgb = hsv_to_rgb(hsv);
//! assert!((rgb[1] - 255.0).abs() < 1e-3);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use boxfit_core::CHANNELS;

/// Converts one RGB pixel to HSV.
#[inline]
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = delta / (v.abs() + f32::EPSILON);
    let k = 60.0 / (delta + f32::EPSILON);

    let mut h = if v == r {
        (g - b) * k
    } else if v == g {
        (b - r) * k + 120.0
    } else {
        (r - g) * k + 240.0
    };
    if h < 0.0 {
        h += 360.0;
    }
    // (g - b) * k can round up to exactly 360 for tiny negative differences
    if h >= 360.0 {
        h -= 360.0;
    }

    [h, s, v]
}

/// Converts one HSV pixel to RGB.
///
/// Hue outside `[0, 360)` wraps around; zero saturation yields gray.
#[inline]
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    if s == 0.0 {
        return [v, v, v];
    }

    let mut h = h / 60.0;
    h -= (h / 6.0).floor() * 6.0;
    if h >= 6.0 {
        h = 0.0;
    }

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u8 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Applies `f` to every interleaved 3-channel pixel of `data`.
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub(crate) fn for_each_pixel<F>(data: &mut [f32], f: F)
where
    F: Fn(&mut [f32]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    data.par_chunks_exact_mut(CHANNELS).for_each(f);

    #[cfg(not(feature = "parallel"))]
    data.chunks_exact_mut(CHANNELS).for_each(f);
}

/// Converts an interleaved RGB buffer to HSV in place.
pub fn rgb_to_hsv_inplace(data: &mut [f32]) {
    for_each_pixel(data, |px| {
        let hsv = rgb_to_hsv([px[0], px[1], px[2]]);
        px.copy_from_slice(&hsv);
    });
}

/// Converts an interleaved HSV buffer to RGB in place.
pub fn hsv_to_rgb_inplace(data: &mut [f32]) {
    for_each_pixel(data, |px| {
        let rgb = hsv_to_rgb([px[0], px[1], px[2]]);
        px.copy_from_slice(&rgb);
    });
}
