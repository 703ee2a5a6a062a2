//! Letterbox session: forward resize-and-pad, inverse crop.
//!
//! A [`Letterbox`] owns two images:
//!
//! - the **working image**, which starts as the source and becomes the
//!   resized content after [`Letterbox::process`], or the recovered region
//!   after [`Letterbox::restore`]
//! - the **canvas**, a zero-padded image of the target size
//!
//! The crop size is fixed when the session is built and reused verbatim by
//! every `restore`, so the region recovered is always exactly the region
//! `process` wrote.
//!
//! ```text
//!            process()                      restore(buf)
//! source ──resize──► content ──pad──► canvas ──overwrite──► canvas ──crop──► content
//! ```
//!
//! # Example
//!
//! ```rust
//! use boxfit_core::Size;
//! use boxfit_ops::letterbox::Letterbox;
//!
//! let pixels = vec![0.5f32; 200 * 100 * 3];
//! let mut lb = Letterbox::new(pixels, Size::new(200, 100), Size::new(100, 100)).unwrap();
//!
//! let canvas = lb.process().unwrap().clone();
//! assert_eq!(canvas.shape(), [100, 100, 3]);
//!
//! // ... run the model on `canvas`, then recover the content region
//! let restored = lb.restore(canvas.data()).unwrap();
//! assert_eq!(restored.shape(), [50, 100, 3]);
//! ```

use crate::geometry::LetterboxGeometry;
use crate::resize::{Filter, resize_image};
use crate::{OpsError, OpsResult};
use boxfit_core::{RgbImage, Size};
use tracing::debug;

/// Session options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LetterboxOptions {
    /// Resampling filter for the forward resize.
    pub filter: Filter,
}

/// Where a session is in its forward/inverse cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterboxState {
    /// Holds the source image; nothing emitted yet.
    Created,
    /// Canvas holds the padded output of the last `process`.
    Processed,
    /// Working image holds the region cropped by the last `restore`.
    Restored,
}

/// Stateful letterbox session.
///
/// Every method takes `&mut self`; a session cannot be driven from two
/// places at once.
#[derive(Debug, Clone)]
pub struct Letterbox {
    image: RgbImage,
    canvas: RgbImage,
    geometry: LetterboxGeometry,
    options: LetterboxOptions,
    state: LetterboxState,
}

impl Letterbox {
    /// Creates a session over `data` (source image) for a `target` canvas.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if `data.len() != source.area() * 3`
    /// - [`OpsError::InvalidTargetShape`] if the target has a zero side
    pub fn new(data: Vec<f32>, source: Size, target: Size) -> OpsResult<Self> {
        Self::with_options(data, source, target, LetterboxOptions::default())
    }

    /// Creates a session with explicit options.
    pub fn with_options(
        data: Vec<f32>,
        source: Size,
        target: Size,
        options: LetterboxOptions,
    ) -> OpsResult<Self> {
        let geometry = LetterboxGeometry::compute(source, target)?;
        let expected = source.buffer_len().ok_or_else(|| {
            OpsError::InvalidDimensions(format!("source {source} overflows buffer size"))
        })?;
        if data.len() != expected {
            return Err(OpsError::size_mismatch(expected, data.len()));
        }

        let image = RgbImage::from_vec(source, data)?;
        debug!(%source, %target, resized = %geometry.resized, "letterbox session created");

        Ok(Self {
            image,
            canvas: RgbImage::zeros(geometry.padded_size()),
            geometry,
            options,
            state: LetterboxState::Created,
        })
    }

    /// Resizes the working image into the canvas top-left and zero-pads the
    /// rest. Returns the canvas, shape `[target.h, target.w, 3]`.
    ///
    /// A second call without an intervening [`restore`](Self::restore)
    /// returns the existing canvas untouched.
    pub fn process(&mut self) -> OpsResult<&RgbImage> {
        if self.state == LetterboxState::Processed {
            debug!("letterbox already processed, returning existing canvas");
            return Ok(&self.canvas);
        }

        let resized = self.geometry.resized;
        let content = resize_image(&self.image, resized, self.options.filter)?;

        let mut canvas = RgbImage::zeros(self.geometry.padded_size());
        canvas.blit(&content, 0, 0)?;

        self.image = content;
        self.canvas = canvas;
        self.state = LetterboxState::Processed;
        debug!(
            pad_right = self.geometry.pad_right,
            pad_bottom = self.geometry.pad_bottom,
            "letterbox processed"
        );
        Ok(&self.canvas)
    }

    /// Overwrites the canvas with `data` and crops the content region back
    /// out. Returns the cropped image, shape `[resized.h, resized.w, 3]`.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`] carrying the required length when
    /// `data.len() != target.area() * 3`. The session is unchanged.
    pub fn restore(&mut self, data: &[f32]) -> OpsResult<&RgbImage> {
        let expected = self.expected_restore_len();
        if data.len() != expected {
            return Err(OpsError::size_mismatch(expected, data.len()));
        }

        self.canvas.copy_from_slice(data)?;
        self.image = self.canvas.crop(self.geometry.crop_rect())?;
        self.state = LetterboxState::Restored;
        debug!(resized = %self.geometry.resized, "letterbox restored");
        Ok(&self.image)
    }

    /// Number of floats [`restore`](Self::restore) expects.
    #[inline]
    pub fn expected_restore_len(&self) -> usize {
        self.canvas.data().len()
    }

    /// Geometry fixed at construction.
    #[inline]
    pub fn geometry(&self) -> &LetterboxGeometry {
        &self.geometry
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> LetterboxState {
        self.state
    }

    /// Current canvas (zeros until the first `process`).
    #[inline]
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Current working image.
    #[inline]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}
