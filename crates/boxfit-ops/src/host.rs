//! Loosely typed entry points for array-based hosts.
//!
//! Scripting-language bindings hand over flat `float32` buffers and plain
//! numeric arrays. This module is the layer between that world and the typed
//! API: it parses `[height, width]` shape arrays, checks buffer lengths, and
//! turns variable-length color lists into [`ColorTarget`] / [`ChannelFill`].
//! Every check runs before any pixel is touched.
//!
//! | Host call                                   | Typed API                      |
//! |---------------------------------------------|--------------------------------|
//! | `create_letterbox(pixels, [h,w], [h,w])`    | [`Letterbox::new`]             |
//! | `session.process()`                         | [`Letterbox::process`]         |
//! | `session.restore(pixels)`                   | [`Letterbox::restore`]         |
//! | `adjust_hue(pixels, [h,w], [h,s?,v?])`      | [`ColorRemapper::remap`]       |
//! | `fill_channels(pixels, [h,w], [h,s?])`      | [`ColorRemapper::fill`]        |
//!
//! ```rust
//! use boxfit_ops::host;
//!
//! let pixels = vec![0.25f32; 48 * 64 * 3];
//! let mut session = host::create_letterbox(&pixels, &[48.0, 64.0], &[32.0, 32.0]).unwrap();
//! let out = session.process().unwrap();
//! assert_eq!(out.shape, [32, 32, 3]);
//!
//! let back = session.restore(&out.array).unwrap();
//! assert_eq!(back.shape, [24, 32, 3]);
//! ```

use crate::letterbox::{Letterbox, LetterboxOptions, LetterboxState};
use crate::remap::{ChannelFill, ColorRemapper, ColorTarget};
use crate::{OpsError, OpsResult};
use boxfit_core::{RgbImage, Size};
use tracing::trace;

/// Pixel buffer plus its `[height, width, 3]` shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostArray {
    /// Interleaved row-major pixels.
    pub array: Vec<f32>,
    /// `[height, width, channels]`.
    pub shape: [usize; 3],
}

impl From<&RgbImage> for HostArray {
    fn from(image: &RgbImage) -> Self {
        Self {
            array: image.data().to_vec(),
            shape: image.shape(),
        }
    }
}

/// Letterbox session as seen by a host.
#[derive(Debug)]
pub struct SessionHandle {
    inner: Letterbox,
}

impl SessionHandle {
    /// Forward resize and pad.
    pub fn process(&mut self) -> OpsResult<HostArray> {
        self.inner.process().map(HostArray::from)
    }

    /// Inverse crop. `pixels` must hold `target_h * target_w * 3` floats.
    pub fn restore(&mut self, pixels: &[f32]) -> OpsResult<HostArray> {
        self.inner.restore(pixels).map(HostArray::from)
    }

    /// Number of floats [`restore`](Self::restore) expects.
    pub fn length(&self) -> usize {
        self.inner.expected_restore_len()
    }

    /// Current session state.
    pub fn state(&self) -> LetterboxState {
        self.inner.state()
    }

    /// Borrows the typed session.
    pub fn letterbox(&self) -> &Letterbox {
        &self.inner
    }
}

/// Which argument a shape belongs to; picks the error for bad values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeRole {
    Source,
    Target,
}

/// Parses a `[height, width]` array into a [`Size`].
///
/// Fractions truncate toward zero; extra entries are ignored.
fn parse_shape(shape: &[f64], arg: usize, role: ShapeRole) -> OpsResult<Size> {
    let [h, w] = match *shape {
        [h, w, ..] => [h, w],
        _ => {
            return Err(OpsError::ArgumentType(format!(
                "argument {arg} must be [height, width]"
            )));
        }
    };
    if !h.is_finite() || !w.is_finite() {
        return Err(OpsError::ArgumentType(format!(
            "argument {arg} must be [height, width] with finite numbers"
        )));
    }

    let (h, w) = (h.trunc(), w.trunc());
    if h > u32::MAX as f64 || w > u32::MAX as f64 {
        return Err(OpsError::ArgumentType(format!(
            "argument {arg}: shape [{h}, {w}] is too large"
        )));
    }
    match role {
        ShapeRole::Target if h <= 0.0 || w <= 0.0 => Err(OpsError::InvalidTargetShape {
            width: w as i64,
            height: h as i64,
        }),
        ShapeRole::Source if h < 0.0 || w < 0.0 => Err(OpsError::ArgumentType(format!(
            "argument {arg}: shape [{h}, {w}] has a negative side"
        ))),
        _ => Ok(Size::from_shape([h as u32, w as u32])),
    }
}

/// Checks that `pixels` holds exactly `size.area() * 3` floats.
fn check_pixels(pixels: &[f32], size: Size) -> OpsResult<()> {
    let expected = size
        .buffer_len()
        .ok_or_else(|| OpsError::InvalidDimensions(format!("{size} overflows buffer size")))?;
    if pixels.len() != expected {
        return Err(OpsError::size_mismatch(expected, pixels.len()));
    }
    Ok(())
}

fn to_components(color: &[f64]) -> Vec<f32> {
    color.iter().map(|&c| c as f32).collect()
}

/// Creates a letterbox session from host arrays.
///
/// # Errors
///
/// - [`OpsError::ArgumentType`] for a malformed source or target shape
/// - [`OpsError::InvalidTargetShape`] for a target side `<= 0`
/// - [`OpsError::SizeMismatch`] if `pixels` does not match the source shape
pub fn create_letterbox(
    pixels: &[f32],
    source_shape: &[f64],
    target_shape: &[f64],
) -> OpsResult<SessionHandle> {
    create_letterbox_with(pixels, source_shape, target_shape, LetterboxOptions::default())
}

/// [`create_letterbox`] with explicit options.
pub fn create_letterbox_with(
    pixels: &[f32],
    source_shape: &[f64],
    target_shape: &[f64],
    options: LetterboxOptions,
) -> OpsResult<SessionHandle> {
    let source = parse_shape(source_shape, 1, ShapeRole::Source)?;
    let target = parse_shape(target_shape, 2, ShapeRole::Target)?;
    check_pixels(pixels, source)?;
    let inner = Letterbox::with_options(pixels.to_vec(), source, target, options)?;
    Ok(SessionHandle { inner })
}

/// Moves the dominant color of `pixels` toward `color = [h, s?, v?]`, in
/// place. An empty `color` leaves `pixels` untouched.
pub fn adjust_hue(pixels: &mut [f32], shape: &[f64], color: &[f64]) -> OpsResult<()> {
    adjust_hue_with(&ColorRemapper::default(), pixels, shape, color)
}

/// [`adjust_hue`] with a configured remapper.
pub fn adjust_hue_with(
    remapper: &ColorRemapper,
    pixels: &mut [f32],
    shape: &[f64],
    color: &[f64],
) -> OpsResult<()> {
    let size = parse_shape(shape, 1, ShapeRole::Source)?;
    let Some(target) = ColorTarget::from_components(&to_components(color)) else {
        trace!("empty color target, nothing to do");
        return Ok(());
    };
    check_pixels(pixels, size)?;
    remapper.remap(pixels, target)?;
    Ok(())
}

/// Overwrites hue (and saturation) of `pixels` with `color = [h, s?]`, in
/// place. An empty `color` leaves `pixels` untouched.
pub fn fill_channels(pixels: &mut [f32], shape: &[f64], color: &[f64]) -> OpsResult<()> {
    let size = parse_shape(shape, 1, ShapeRole::Source)?;
    let Some(fill) = ChannelFill::from_components(&to_components(color)) else {
        trace!("empty fill, nothing to do");
        return Ok(());
    };
    check_pixels(pixels, size)?;
    ColorRemapper::default().fill(pixels, fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape_order() {
        let size = parse_shape(&[100.0, 200.0], 1, ShapeRole::Source).unwrap();
        assert_eq!(size, Size::new(200, 100));
        let size = parse_shape(&[10.9, 3.2, 3.0], 1, ShapeRole::Source).unwrap();
        assert_eq!(size, Size::new(3, 10));
        let size = parse_shape(&[1.0, 5.0], 2, ShapeRole::Target).unwrap();
        assert_eq!(size, Size::from_shape([1, 5]));
    }

    #[test]
    fn test_parse_shape_errors() {
        assert!(matches!(
            parse_shape(&[1.0], 1, ShapeRole::Source),
            Err(OpsError::ArgumentType(_))
        ));
        assert!(matches!(
            parse_shape(&[f64::NAN, 1.0], 1, ShapeRole::Source),
            Err(OpsError::ArgumentType(_))
        ));
        assert!(matches!(
            parse_shape(&[-1.0, 4.0], 1, ShapeRole::Source),
            Err(OpsError::ArgumentType(_))
        ));
        assert!(matches!(
            parse_shape(&[-1.0, 4.0], 2, ShapeRole::Target),
            Err(OpsError::InvalidTargetShape { width: 4, height: -1 })
        ));
        assert!(matches!(
            parse_shape(&[4.0, 0.0], 2, ShapeRole::Target),
            Err(OpsError::InvalidTargetShape { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_session_roundtrip() {
        let pixels: Vec<f32> = (0..20 * 10 * 3).map(|i| i as f32).collect();
        let mut session = create_letterbox(&pixels, &[10.0, 20.0], &[10.0, 10.0]).unwrap();
        assert_eq!(session.length(), 300);

        let out = session.process().unwrap();
        assert_eq!(out.shape, [10, 10, 3]);
        assert_eq!(session.state(), LetterboxState::Processed);

        let back = session.restore(&out.array).unwrap();
        assert_eq!(back.shape, [5, 10, 3]);
        assert_eq!(back.array, out.array[..150]);
    }

    #[test]
    fn test_restore_length_error() {
        let pixels = vec![0.0f32; 12];
        let mut session = create_letterbox(&pixels, &[2.0, 2.0], &[3.0, 3.0]).unwrap();
        let err = session.restore(&[0.0; 4]).unwrap_err();
        assert_eq!(err.expected_len(), Some(27));
    }

    #[test]
    fn test_create_rejects_wrong_pixel_count() {
        let err = create_letterbox(&[0.0; 5], &[2.0, 2.0], &[3.0, 3.0]).unwrap_err();
        assert!(matches!(err, OpsError::SizeMismatch { expected: 12, got: 5 }));
    }

    #[test]
    fn test_adjust_hue_empty_is_noop() {
        let original: Vec<f32> = vec![0.1, 0.7, 0.3, 0.9, 0.2, 0.4];
        let mut pixels = original.clone();
        adjust_hue(&mut pixels, &[1.0, 2.0], &[]).unwrap();
        assert_eq!(pixels, original);
        fill_channels(&mut pixels, &[1.0, 2.0], &[]).unwrap();
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_adjust_hue_checks_shape() {
        let mut pixels = vec![0.5f32; 6];
        let err = adjust_hue(&mut pixels, &[2.0, 2.0], &[10.0]).unwrap_err();
        assert_eq!(err.expected_len(), Some(12));
        assert!(matches!(
            adjust_hue(&mut pixels, &[], &[10.0]),
            Err(OpsError::ArgumentType(_))
        ));
    }

    #[test]
    fn test_fill_channels_sets_hue() {
        let mut pixels = vec![200.0f32, 40.0, 40.0];
        fill_channels(&mut pixels, &[1.0, 1.0], &[240.0]).unwrap();
        // Pure-ish blue with the original value
        assert!((pixels[2] - 200.0).abs() < 1e-3);
        assert!(pixels[0] < pixels[2] && pixels[1] < pixels[2]);
    }
}
