//! Image resize and resampling operations.
//!
//! Separable two-pass resampler over interleaved `f32` data. When
//! downscaling, the kernel is widened by the scale factor so every source
//! pixel contributes (anti-aliased, area-like result).
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth, the letterbox default)
//! - [`Filter::Area`] - Box average when shrinking, bilinear when enlarging
//! - [`Filter::Bicubic`] - Cubic interpolation (sharper than bilinear)
//! - [`Filter::Lanczos3`] - High-quality sinc-based
//!
//! # Example
//!
//! ```rust
//! use boxfit_ops::resize::{resize_f32, Filter};
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 3];
//! let dst = resize_f32(&src, 64, 64, 3, 32, 16, Filter::Area).unwrap();
//! assert_eq!(dst.len(), 32 * 16 * 3);
//! ```

use crate::{OpsError, OpsResult};
use boxfit_core::{RgbImage, Size};
use tracing::trace;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    #[default]
    Bilinear,
    /// Pixel-area averaging.
    Area,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality).
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest | Filter::Area => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Area => box_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Parses a filter name as accepted on the command line.
    ///
    /// ```rust
    /// use boxfit_ops::Filter;
    ///
    /// assert_eq!(Filter::from_name("linear"), Some(Filter::Bilinear));
    /// assert_eq!(Filter::from_name("box"), Some(Filter::Area));
    /// assert_eq!(Filter::from_name("sinc"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nearest" => Some(Filter::Nearest),
            "bilinear" | "linear" => Some(Filter::Bilinear),
            "area" | "box" => Some(Filter::Area),
            "bicubic" | "cubic" => Some(Filter::Bicubic),
            "lanczos" | "lanczos3" => Some(Filter::Lanczos3),
            _ => None,
        }
    }

    /// Area averaging only makes sense when shrinking.
    #[inline]
    fn for_scale(self, scale: f32) -> Self {
        match self {
            Filter::Area if scale < 1.0 => Filter::Bilinear,
            other => other,
        }
    }
}

/// Inclusive at 0.5 so a sample centered between two pixels never loses both.
#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() <= 0.5 { 1.0 } else { 0.0 }
}

/// Box weight; half weight exactly on the edge so neighbors split it.
#[inline]
fn box_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 0.5 {
        1.0
    } else if ax == 0.5 {
        0.5
    } else {
        0.0
    }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Bicubic (Mitchell-Netravali) weight function.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    // Mitchell-Netravali with B=1/3, C=1/3
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Resizes interleaved `f32` image data.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of interleaved channels
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
/// * `filter` - Resampling filter
///
/// Matching source and destination sizes return an exact copy.
///
/// ```rust
/// use boxfit_ops::resize::{resize_f32, Filter};
///
/// let src = vec![0.5f32; 16 * 16 * 3];
/// let dst = resize_f32(&src, 16, 16, 3, 32, 32, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 32 * 3);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    let expected = src_w
        .checked_mul(src_h)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} floats, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 || channels == 0 {
        return Err(OpsError::InvalidDimensions(
            "source size and channel count must be > 0".into(),
        ));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    if src_w == dst_w && src_h == dst_h {
        trace!(src_w, src_h, "resize is identity");
        return Ok(src.to_vec());
    }

    trace!(src_w, src_h, dst_w, dst_h, ?filter, "resizing");

    // Two-pass separable resize: horizontal then vertical
    let temp = if src_w == dst_w {
        src.to_vec()
    } else {
        resize_horizontal(src, src_w, src_h, channels, dst_w, filter)
    };
    let result = if src_h == dst_h {
        temp
    } else {
        resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter)
    };

    Ok(result)
}

/// Resizes an [`RgbImage`] to `size`.
pub fn resize_image(image: &RgbImage, size: Size, filter: Filter) -> OpsResult<RgbImage> {
    let data = resize_f32(
        image.data(),
        image.width() as usize,
        image.height() as usize,
        boxfit_core::CHANNELS,
        size.width as usize,
        size.height as usize,
        filter,
    )?;
    Ok(RgbImage::from_vec(size, data)?)
}

/// Source taps `[first, last]` around `center` for one output sample.
#[inline]
fn tap_range(center: f32, support: f32, len: usize) -> (usize, usize) {
    let first = ((center - support).floor() as isize).max(0) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(len - 1);
    (first, last)
}

fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * channels];
    let scale = src_w as f32 / dst_w as f32;
    let filter = filter.for_scale(scale);
    let widen = scale.max(1.0);
    let support = filter.support() * widen;
    let mut sum = vec![0.0f32; channels];

    for y in 0..src_h {
        for x in 0..dst_w {
            // Map destination x to source x
            let center = (x as f32 + 0.5) * scale - 0.5;
            let (left, right) = tap_range(center, support, src_w);

            sum.fill(0.0);
            let mut weight_sum = 0.0f32;

            for sx in left..=right {
                let w = filter.weight((sx as f32 - center) / widen);
                if w == 0.0 {
                    continue;
                }
                weight_sum += w;

                let src_idx = (y * src_w + sx) * channels;
                for (acc, &v) in sum.iter_mut().zip(&src[src_idx..src_idx + channels]) {
                    *acc += v * w;
                }
            }

            let dst_idx = (y * dst_w + x) * channels;
            if weight_sum > 0.0 {
                for (out, acc) in dst[dst_idx..dst_idx + channels].iter_mut().zip(&sum) {
                    *out = acc / weight_sum;
                }
            }
        }
    }

    dst
}

fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src_w * dst_h * channels];
    let scale = src_h as f32 / dst_h as f32;
    let filter = filter.for_scale(scale);
    let widen = scale.max(1.0);
    let support = filter.support() * widen;
    let mut weights = Vec::new();

    for y in 0..dst_h {
        // Map destination y to source y
        let center = (y as f32 + 0.5) * scale - 0.5;
        let (top, bottom) = tap_range(center, support, src_h);

        weights.clear();
        weights.extend((top..=bottom).map(|sy| filter.weight((sy as f32 - center) / widen)));
        let weight_sum: f32 = weights.iter().sum();
        if weight_sum <= 0.0 {
            continue;
        }

        let dst_row = &mut dst[y * src_w * channels..(y + 1) * src_w * channels];
        for (sy, &w) in (top..=bottom).zip(&weights) {
            if w == 0.0 {
                continue;
            }
            let src_row = &src[sy * src_w * channels..(sy + 1) * src_w * channels];
            for (out, &v) in dst_row.iter_mut().zip(src_row) {
                *out += v * w;
            }
        }
        for out in dst_row.iter_mut() {
            *out /= weight_sum;
        }
    }

    dst
}
