//! Letterbox geometry.
//!
//! A source image is shrunk (or enlarged) by a single factor so that it fits
//! entirely inside the target canvas, then padded with zeros on the **right
//! and bottom** edges only. Content therefore always starts at (0, 0), which
//! is what lets the inverse be a plain top-left crop.
//!
//! ```text
//! target canvas
//! ┌───────────────────┬─────┐
//! │                   │     │
//! │  resized content  │ pad │
//! │                   │right│
//! ├───────────────────┘     │
//! │       pad bottom        │
//! └─────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use boxfit_core::Size;
//! use boxfit_ops::geometry::LetterboxGeometry;
//!
//! let g = LetterboxGeometry::compute(Size::new(200, 100), Size::new(100, 100)).unwrap();
//! assert_eq!(g.scale, 2.0);
//! assert_eq!(g.resized, Size::new(100, 50));
//! assert_eq!((g.pad_right, g.pad_bottom), (0, 50));
//! ```

use crate::{OpsError, OpsResult};
use boxfit_core::{Rect, Size};
use tracing::trace;

/// Slack for `source / scale` landing a hair below an integer through f64
/// rounding on the binding axis.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Scale and padding that place a source image inside a target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterboxGeometry {
    /// Source image size.
    pub source: Size,
    /// Target canvas size.
    pub target: Size,
    /// Source pixels per canvas pixel: `max(src.w / dst.w, src.h / dst.h)`.
    pub scale: f64,
    /// Size of the resized content in the canvas top-left corner.
    pub resized: Size,
    /// Zero columns appended on the right.
    pub pad_right: u32,
    /// Zero rows appended at the bottom.
    pub pad_bottom: u32,
}

impl LetterboxGeometry {
    /// Computes the letterbox transform of `source` into `target`.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidTargetShape`] if the target has a zero side
    /// - [`OpsError::InvalidDimensions`] if the source has a zero side
    pub fn compute(source: Size, target: Size) -> OpsResult<Self> {
        if target.is_empty() {
            return Err(OpsError::InvalidTargetShape {
                width: target.width as i64,
                height: target.height as i64,
            });
        }
        if source.is_empty() {
            return Err(OpsError::InvalidDimensions(format!(
                "source image {source} has zero area"
            )));
        }

        let scale = (source.width as f64 / target.width as f64)
            .max(source.height as f64 / target.height as f64);

        let resized = Size::new(
            fit_axis(source.width, scale, target.width),
            fit_axis(source.height, scale, target.height),
        );

        let geometry = Self {
            source,
            target,
            scale,
            resized,
            pad_right: target.width - resized.width,
            pad_bottom: target.height - resized.height,
        };
        trace!(%source, %target, scale, resized = %geometry.resized, "letterbox geometry");
        Ok(geometry)
    }

    /// Region of the canvas holding resized content.
    #[inline]
    pub fn crop_rect(&self) -> Rect {
        Rect::from_size(self.resized.width, self.resized.height)
    }

    /// Size of the padded output (always the target).
    #[inline]
    pub fn padded_size(&self) -> Size {
        self.target
    }

    /// Fraction of the canvas covered by content, in `(0, 1]`.
    pub fn content_ratio(&self) -> f64 {
        self.resized.area() as f64 / self.target.area() as f64
    }

    /// Maps a canvas coordinate back into source pixel coordinates.
    ///
    /// Coordinates in the padding map past the source edge; callers decide
    /// whether to clip.
    ///
    /// ```rust
    /// use boxfit_core::Size;
    /// use boxfit_ops::geometry::LetterboxGeometry;
    ///
    /// let g = LetterboxGeometry::compute(Size::new(640, 480), Size::new(320, 320)).unwrap();
    /// assert_eq!(g.map_to_source(160.0, 120.0), (320.0, 240.0));
    /// ```
    #[inline]
    pub fn map_to_source(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale, y * self.scale)
    }
}

/// `floor(len / scale)`, clamped into `1..=limit`.
#[inline]
fn fit_axis(len: u32, scale: f64, limit: u32) -> u32 {
    let fitted = (len as f64 / scale + FLOOR_TOLERANCE).floor();
    (fitted as u32).clamp(1, limit)
}
