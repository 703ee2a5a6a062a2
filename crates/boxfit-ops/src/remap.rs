//! HSV color remapping.
//!
//! Two ways of pushing an RGB image toward a target color:
//!
//! - [`ColorRemapper::remap`] moves the image's **dominant** color onto a
//!   [`ColorTarget`]. Hue is rotated by `target - dominant`; saturation and
//!   value (when given) go through a two-segment linear map pinned at
//!   `(dominant, target)` that keeps `0` and the domain maximum fixed.
//! - [`ColorRemapper::fill`] overwrites hue (and saturation) with a
//!   [`ChannelFill`] constant, leaving value alone.
//!
//! ```text
//!  new
//!  max ┤                 ╱
//!      │              ╱
//!  tgt ┤──────────●╱        two segments through (dom, tgt)
//!      │       ╱  │
//!      │    ╱     │
//!    0 ┼─╱────────┼──────┤
//!      0         dom    max   old
//! ```
//!
//! Both work on a scratch HSV copy and write back only on success, so an
//! error never leaves a half-converted buffer.
//!
//! # Example
//!
//! ```rust
//! use boxfit_ops::remap::{ColorRemapper, ColorTarget};
//!
//! // Two reddish pixels on a 0..255 scale
//! let mut pixels = vec![200.0, 40.0, 40.0, 180.0, 60.0, 50.0];
//! let remapper = ColorRemapper::default();
//! let dominant = remapper.remap(&mut pixels, ColorTarget::Hue(120.0)).unwrap();
//! assert!(dominant[0] < 10.0);
//! // Now green-dominant
//! assert!(pixels[1] > pixels[0]);
//! ```

use crate::dominant::{DominantColorEstimator, KMeansCriteria};
use crate::error::HsvChannel;
use crate::hsv::{for_each_pixel, hsv_to_rgb_inplace, rgb_to_hsv_inplace};
use crate::{OpsError, OpsResult};
use boxfit_core::{CHANNELS, RgbImage};
use tracing::{debug, trace};

/// Saturation domain upper bound.
pub const SATURATION_MAX: f32 = 1.0;

/// Default value domain upper bound (8-bit scale stored as float).
pub const DEFAULT_VALUE_MAX: f32 = 255.0;

/// Relative distance from a domain bound under which a pivot is degenerate.
const DEGENERATE_TOLERANCE: f32 = 1e-6;

/// Relative margin used to pull a degenerate pivot back inside its domain.
const CLAMP_MARGIN: f32 = 1e-4;

/// Target for dominant-relative remapping.
///
/// Hue is in degrees; saturation in `0..=1`; value on the remapper's value
/// domain (see [`RemapConfig::value_max`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorTarget {
    /// Rotate hue only.
    Hue(f32),
    /// Rotate hue, remap saturation.
    HueSat(f32, f32),
    /// Rotate hue, remap saturation and value.
    HueSatVal(f32, f32, f32),
}

impl ColorTarget {
    /// Builds a target from 1 to 3 components `[h, s, v]`.
    ///
    /// Returns `None` for an empty slice; components past the third are
    /// ignored.
    ///
    /// ```rust
    /// use boxfit_ops::remap::ColorTarget;
    ///
    /// assert_eq!(ColorTarget::from_components(&[]), None);
    /// assert_eq!(
    ///     ColorTarget::from_components(&[30.0, 0.5]),
    ///     Some(ColorTarget::HueSat(30.0, 0.5))
    /// );
    /// ```
    pub fn from_components(components: &[f32]) -> Option<Self> {
        match *components {
            [] => None,
            [h] => Some(Self::Hue(h)),
            [h, s] => Some(Self::HueSat(h, s)),
            [h, s, v, ..] => Some(Self::HueSatVal(h, s, v)),
        }
    }

    /// Target hue in degrees.
    #[inline]
    pub fn hue(&self) -> f32 {
        match *self {
            Self::Hue(h) | Self::HueSat(h, _) | Self::HueSatVal(h, _, _) => h,
        }
    }

    /// Target saturation, if remapped.
    #[inline]
    pub fn saturation(&self) -> Option<f32> {
        match *self {
            Self::Hue(_) => None,
            Self::HueSat(_, s) | Self::HueSatVal(_, s, _) => Some(s),
        }
    }

    /// Target value, if remapped.
    #[inline]
    pub fn value(&self) -> Option<f32> {
        match *self {
            Self::HueSatVal(_, _, v) => Some(v),
            _ => None,
        }
    }

    fn validate(&self) -> OpsResult<()> {
        let finite = self.hue().is_finite()
            && self.saturation().is_none_or(f32::is_finite)
            && self.value().is_none_or(f32::is_finite);
        if finite {
            Ok(())
        } else {
            Err(OpsError::InvalidParameter(format!(
                "color target components must be finite: {self:?}"
            )))
        }
    }
}

/// Constant fill for hue, or hue and saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelFill {
    /// Set every hue to this value.
    Hue(f32),
    /// Set every hue and saturation to these values.
    HueSat(f32, f32),
}

impl ChannelFill {
    /// Builds a fill from 1 or 2 components `[h, s]`.
    ///
    /// Returns `None` for an empty slice; components past the second are
    /// ignored.
    pub fn from_components(components: &[f32]) -> Option<Self> {
        match *components {
            [] => None,
            [h] => Some(Self::Hue(h)),
            [h, s, ..] => Some(Self::HueSat(h, s)),
        }
    }

    fn validate(&self) -> OpsResult<()> {
        let finite = match *self {
            Self::Hue(h) => h.is_finite(),
            Self::HueSat(h, s) => h.is_finite() && s.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(OpsError::InvalidParameter(format!(
                "fill components must be finite: {self:?}"
            )))
        }
    }
}

/// What to do when the dominant color sits on a domain bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DegeneratePolicy {
    /// Fail with [`OpsError::DegenerateColor`].
    #[default]
    Error,
    /// Move the pivot just inside the domain and continue.
    Clamp,
}

/// Remapper configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemapConfig {
    /// Upper bound of the value channel (255 for 8-bit-scaled floats).
    pub value_max: f32,
    /// Handling of a dominant saturation/value on a domain bound.
    pub degenerate: DegeneratePolicy,
    /// Clustering criteria for the dominant color.
    pub kmeans: KMeansCriteria,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            value_max: DEFAULT_VALUE_MAX,
            degenerate: DegeneratePolicy::default(),
            kmeans: KMeansCriteria::default(),
        }
    }
}

/// Wraps a hue into `[0, 360)`.
///
/// ```rust
/// use boxfit_ops::remap::wrap_hue;
///
/// assert_eq!(wrap_hue(-10.0), 350.0);
/// assert_eq!(wrap_hue(365.0), 5.0);
/// ```
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Two-segment linear map over `[0, max]` sending `pivot` to `target`.
///
/// Below the pivot the line passes through the origin; from the pivot up it
/// passes through `(max, max)`. `pivot` must lie strictly inside `(0, max)`.
///
/// ```rust
/// use boxfit_ops::remap::pivot_remap;
///
/// assert_eq!(pivot_remap(0.25, 0.5, 0.8, 1.0), 0.4);
/// assert_eq!(pivot_remap(1.0, 0.5, 0.8, 1.0), 1.0);
/// ```
#[inline]
pub fn pivot_remap(x: f32, pivot: f32, target: f32, max: f32) -> f32 {
    if x < pivot {
        target / pivot * x
    } else {
        (max - target) / (max - pivot) * x + max * (target - pivot) / (max - pivot)
    }
}

/// Rewrites image colors in HSV space.
///
/// Immutable after construction and safe to share between threads; each
/// call must own its buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRemapper {
    config: RemapConfig,
    estimator: DominantColorEstimator,
}

impl Default for ColorRemapper {
    fn default() -> Self {
        Self {
            config: RemapConfig::default(),
            estimator: DominantColorEstimator::default(),
        }
    }
}

impl ColorRemapper {
    /// Creates a remapper.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for a non-positive `value_max` or
    /// unusable k-means criteria.
    pub fn new(config: RemapConfig) -> OpsResult<Self> {
        if !(config.value_max.is_finite() && config.value_max > 0.0) {
            return Err(OpsError::InvalidParameter(format!(
                "value_max must be finite and > 0, got {}",
                config.value_max
            )));
        }
        let estimator = DominantColorEstimator::new(config.kmeans)?;
        Ok(Self { config, estimator })
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &RemapConfig {
        &self.config
    }

    /// Moves the dominant color of an interleaved RGB buffer onto `target`,
    /// in place. Returns the dominant `[H, S, V]` that was used.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidDimensions`] for an empty or ragged buffer
    /// - [`OpsError::InvalidParameter`] for non-finite target components
    /// - [`OpsError::DegenerateColor`] when a remapped channel's dominant
    ///   value is on a domain bound and the policy is
    ///   [`DegeneratePolicy::Error`]
    ///
    /// The buffer is untouched on error.
    pub fn remap(&self, data: &mut [f32], target: ColorTarget) -> OpsResult<[f32; 3]> {
        check_buffer(data)?;
        target.validate()?;

        let mut hsv = data.to_vec();
        rgb_to_hsv_inplace(&mut hsv);
        let dominant = self.estimator.estimate(&hsv)?;

        let saturation = target
            .saturation()
            .map(|s| {
                self.pivot(HsvChannel::Saturation, dominant[1], SATURATION_MAX)
                    .map(|pivot| (pivot, s))
            })
            .transpose()?;
        let value_max = self.config.value_max;
        let value = target
            .value()
            .map(|v| {
                self.pivot(HsvChannel::Value, dominant[2], value_max)
                    .map(|pivot| (pivot, v))
            })
            .transpose()?;

        let target_hue = target.hue();
        let dominant_hue = dominant[0];
        debug!(?target, ?dominant, "remapping toward target color");

        for_each_pixel(&mut hsv, |px| {
            px[0] = wrap_hue(px[0] + target_hue - dominant_hue);
            if let Some((pivot, s)) = saturation {
                px[1] = pivot_remap(px[1], pivot, s, SATURATION_MAX);
            }
            if let Some((pivot, v)) = value {
                px[2] = pivot_remap(px[2], pivot, v, value_max);
            }
        });

        hsv_to_rgb_inplace(&mut hsv);
        data.copy_from_slice(&hsv);
        Ok(dominant)
    }

    /// [`remap`](Self::remap) over an [`RgbImage`].
    pub fn remap_image(&self, image: &mut RgbImage, target: ColorTarget) -> OpsResult<[f32; 3]> {
        self.remap(image.data_mut(), target)
    }

    /// Overwrites hue (and saturation) of an interleaved RGB buffer with
    /// constants, in place. Value is preserved.
    pub fn fill(&self, data: &mut [f32], fill: ChannelFill) -> OpsResult<()> {
        let mut hsv = self.fill_hsv(data, fill)?;
        hsv_to_rgb_inplace(&mut hsv);
        data.copy_from_slice(&hsv);
        Ok(())
    }

    /// [`fill`](Self::fill) over an [`RgbImage`].
    pub fn fill_image(&self, image: &mut RgbImage, fill: ChannelFill) -> OpsResult<()> {
        self.fill(image.data_mut(), fill)
    }

    /// Returns the HSV buffer produced by [`fill`](Self::fill) before the
    /// conversion back to RGB.
    pub fn fill_hsv(&self, data: &[f32], fill: ChannelFill) -> OpsResult<Vec<f32>> {
        check_buffer(data)?;
        fill.validate()?;
        trace!(?fill, "filling channels");

        let mut hsv = data.to_vec();
        rgb_to_hsv_inplace(&mut hsv);
        for_each_pixel(&mut hsv, |px| match fill {
            ChannelFill::Hue(h) => px[0] = h,
            ChannelFill::HueSat(h, s) => {
                px[0] = h;
                px[1] = s;
            }
        });
        Ok(hsv)
    }

    /// Validates a dominant pivot against its domain `(0, max)`.
    fn pivot(&self, channel: HsvChannel, value: f32, max: f32) -> OpsResult<f32> {
        let tolerance = max * DEGENERATE_TOLERANCE;
        if value > tolerance && value < max - tolerance {
            return Ok(value);
        }

        match self.config.degenerate {
            DegeneratePolicy::Clamp if value.is_finite() => {
                let margin = max * CLAMP_MARGIN;
                let clamped = value.clamp(margin, max - margin);
                debug!(%channel, value, clamped, "clamped degenerate dominant color");
                Ok(clamped)
            }
            _ => Err(OpsError::DegenerateColor {
                channel,
                value,
                max,
            }),
        }
    }
}

fn check_buffer(data: &[f32]) -> OpsResult<()> {
    if data.is_empty() || data.len() % CHANNELS != 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "expected a non-empty 3-channel buffer, got {} floats",
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hsv::{hsv_to_rgb, rgb_to_hsv};
    use approx::assert_abs_diff_eq;

    fn image_from_hsv(pixels: &[[f32; 3]]) -> Vec<f32> {
        pixels.iter().flat_map(|&p| hsv_to_rgb(p)).collect()
    }

    fn to_hsv(data: &[f32]) -> Vec<[f32; 3]> {
        data.chunks_exact(3)
            .map(|c| rgb_to_hsv([c[0], c[1], c[2]]))
            .collect()
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(-10.0), 350.0);
        assert_eq!(wrap_hue(365.0), 5.0);
        assert_eq!(wrap_hue(0.0), 0.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert!(wrap_hue(-1e-9) < 360.0);
    }

    #[test]
    fn test_pivot_continuity() {
        for (pivot, target) in [(0.3, 0.7), (0.8, 0.1), (0.5, 0.5)] {
            assert_abs_diff_eq!(pivot_remap(pivot, pivot, target, 1.0), target, epsilon = 1e-6);
            assert_abs_diff_eq!(pivot_remap(0.0, pivot, target, 1.0), 0.0);
            assert_abs_diff_eq!(pivot_remap(1.0, pivot, target, 1.0), 1.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(pivot_remap(100.0, 100.0, 200.0, 255.0), 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(pivot_remap(255.0, 100.0, 200.0, 255.0), 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_component_parsing() {
        assert_eq!(ColorTarget::from_components(&[1.0]), Some(ColorTarget::Hue(1.0)));
        assert_eq!(
            ColorTarget::from_components(&[1.0, 0.2, 30.0, 99.0]),
            Some(ColorTarget::HueSatVal(1.0, 0.2, 30.0))
        );
        assert_eq!(ChannelFill::from_components(&[]), None);
        assert_eq!(
            ChannelFill::from_components(&[180.0, 0.5, 7.0]),
            Some(ChannelFill::HueSat(180.0, 0.5))
        );
    }

    #[test]
    fn test_hue_rotation_relative_to_dominant() {
        // Dominant hue is 100; shifting to 90 moves every pixel by -10
        let mut data = image_from_hsv(&[[5.0, 0.5, 200.0], [195.0, 0.5, 200.0]]);
        let dominant = ColorRemapper::default()
            .remap(&mut data, ColorTarget::Hue(90.0))
            .unwrap();
        assert_abs_diff_eq!(dominant[0], 100.0, epsilon = 1e-3);

        let hsv = to_hsv(&data);
        assert_abs_diff_eq!(hsv[0][0], 355.0, epsilon = 1e-2);
        assert_abs_diff_eq!(hsv[1][0], 185.0, epsilon = 1e-2);
        assert_abs_diff_eq!(hsv[0][2], 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_saturation_pivot_hits_target() {
        // Equal saturations make the dominant saturation equal each pixel's
        let mut data = image_from_hsv(&[[40.0, 0.4, 180.0], [60.0, 0.4, 120.0]]);
        ColorRemapper::default()
            .remap(&mut data, ColorTarget::HueSat(50.0, 0.9))
            .unwrap();
        for px in to_hsv(&data) {
            assert_abs_diff_eq!(px[1], 0.9, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_value_remap_uses_255_domain() {
        let mut data = image_from_hsv(&[[10.0, 0.5, 100.0], [10.0, 0.5, 200.0]]);
        ColorRemapper::default()
            .remap(&mut data, ColorTarget::HueSatVal(10.0, 0.5, 50.0))
            .unwrap();
        let hsv = to_hsv(&data);
        // Dominant V = 150; 100 < 150 -> 50/150 * 100
        assert_abs_diff_eq!(hsv[0][2], 100.0 / 3.0, epsilon = 1e-2);
        // 200 >= 150 -> 205/105 * 200 + 255 * (50 - 150) / 105
        let expected = 205.0 / 105.0 * 200.0 + 255.0 * -100.0 / 105.0;
        assert_abs_diff_eq!(hsv[1][2], expected, epsilon = 1e-2);
    }

    #[test]
    fn test_degenerate_saturation_is_reported() {
        // Gray image: dominant saturation is 0
        let original = vec![0.5f32; 12];
        let mut data = original.clone();
        let err = ColorRemapper::default()
            .remap(&mut data, ColorTarget::HueSat(0.0, 0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            OpsError::DegenerateColor {
                channel: HsvChannel::Saturation,
                ..
            }
        ));
        assert_eq!(data, original);
    }

    #[test]
    fn test_degenerate_clamp_stays_finite() {
        let config = RemapConfig {
            degenerate: DegeneratePolicy::Clamp,
            ..Default::default()
        };
        let mut data = vec![0.5f32; 12];
        ColorRemapper::new(config)
            .unwrap()
            .remap(&mut data, ColorTarget::HueSatVal(0.0, 0.5, 100.0))
            .unwrap();
        assert!(data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_hue_only_ignores_gray_pivot() {
        // Hue-only targets never divide by the dominant saturation
        let mut data = vec![0.5f32; 12];
        ColorRemapper::default()
            .remap(&mut data, ColorTarget::Hue(200.0))
            .unwrap();
        assert!(data.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_fill_hue_exact() {
        let data = image_from_hsv(&[[10.0, 0.25, 90.0], [300.0, 0.75, 30.0]]);
        let remapper = ColorRemapper::default();
        let hsv = remapper.fill_hsv(&data, ChannelFill::Hue(180.0)).unwrap();
        let before = to_hsv(&data);
        for (px, orig) in hsv.chunks_exact(3).zip(&before) {
            assert_eq!(px[0], 180.0);
            assert_eq!(px[1], orig[1]);
            assert_eq!(px[2], orig[2]);
        }
    }

    #[test]
    fn test_fill_keeps_value() {
        let mut data = image_from_hsv(&[[10.0, 0.25, 90.0], [300.0, 0.75, 30.0]]);
        ColorRemapper::default()
            .fill(&mut data, ChannelFill::HueSat(120.0, 1.0))
            .unwrap();
        let hsv = to_hsv(&data);
        assert_abs_diff_eq!(hsv[0][0], 120.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hsv[0][1], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hsv[0][2], 90.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hsv[1][2], 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_bad_input() {
        let remapper = ColorRemapper::default();
        assert!(remapper.remap(&mut [], ColorTarget::Hue(0.0)).is_err());
        assert!(remapper.remap(&mut [1.0f32; 4], ColorTarget::Hue(0.0)).is_err());
        assert!(
            remapper
                .remap(&mut [1.0f32; 3], ColorTarget::Hue(f32::NAN))
                .is_err()
        );
        assert!(
            ColorRemapper::new(RemapConfig {
                value_max: 0.0,
                ..Default::default()
            })
            .is_err()
        );
    }
}
