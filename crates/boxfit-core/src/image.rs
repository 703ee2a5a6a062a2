//! Owned RGB image buffer.
//!
//! [`RgbImage`] is the only image container in boxfit: three interleaved
//! `f32` channels per pixel, stored row-major, top-to-bottom.
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  ← Row 0
//!         [R G B R G B R G B ...]  ← Row 1
//!         ...
//! ```
//!
//! The channels are nominally R, G, B. Color operations in `boxfit-ops`
//! temporarily hold H, S, V in the same layout.
//!
//! # Usage
//!
//! ```rust
//! use boxfit_core::{Rect, RgbImage};
//!
//! let mut canvas = RgbImage::new(4, 2);
//! let content = RgbImage::filled(2, 2, [1.0, 0.0, 0.0]);
//! canvas.blit(&content, 0, 0).unwrap();
//!
//! let crop = canvas.crop(Rect::new(0, 0, 2, 2)).unwrap();
//! assert_eq!(crop, content);
//! assert_eq!(crop.shape(), [2, 2, 3]);
//! ```

use crate::error::{Error, Result};
use crate::rect::{Rect, Size};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// Owned 3-channel `f32` image.
///
/// Invariant: `data.len() == width * height * 3`, upheld by every constructor.
#[derive(Clone, PartialEq)]
pub struct RgbImage {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl RgbImage {
    /// Creates a new image filled with zeros.
    ///
    /// ```rust
    /// use boxfit_core::RgbImage;
    ///
    /// let img = RgbImage::new(64, 32);
    /// assert_eq!(img.data().len(), 64 * 32 * 3);
    /// assert!(img.data().iter().all(|&v| v == 0.0));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0.0; width as usize * height as usize * CHANNELS],
            width,
            height,
        }
    }

    /// Creates a zero image of the given size.
    #[inline]
    pub fn zeros(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Creates an image from existing pixel data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if the shape overflows `usize`
    /// - [`Error::BufferLength`] if `data.len() != width * height * 3`
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = Size::new(width, height)
            .buffer_len()
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflow"))?;
        if data.len() != expected {
            return Err(Error::buffer_length(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image from existing pixel data and a [`Size`].
    #[inline]
    pub fn from_vec(size: Size, data: Vec<f32>) -> Result<Self> {
        Self::from_data(size.width, size.height, data)
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, pixel: [f32; CHANNELS]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image size as `(width, height)`.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the row-major shape `[height, width, 3]`.
    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, CHANNELS]
    }

    /// Returns the number of `f32` elements per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns a rectangle covering the entire image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns the raw interleaved pixel data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the raw interleaved pixel data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; CHANNELS] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [0.0; CHANNELS];
        result.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        result
    }

    /// Returns a row of pixels as a slice.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Returns a mutable row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Overwrites all pixel data from a slice of matching length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if the lengths differ; the image is
    /// left untouched.
    pub fn copy_from_slice(&mut self, src: &[f32]) -> Result<()> {
        if src.len() != self.data.len() {
            return Err(Error::buffer_length(self.data.len(), src.len()));
        }
        self.data.copy_from_slice(src);
        Ok(())
    }

    /// Copies a region into a new, tightly packed image.
    ///
    /// Rows are copied one at a time, so the result is contiguous even though
    /// the region is a strided window into this image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `region` is not inside the image.
    pub fn crop(&self, region: Rect) -> Result<RgbImage> {
        if !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }

        let row_len = region.width as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_len * region.height as usize);
        let x0 = region.x as usize * CHANNELS;
        for y in region.y..region.bottom() {
            data.extend_from_slice(&self.row(y)[x0..x0 + row_len]);
        }

        Ok(RgbImage {
            data,
            width: region.width,
            height: region.height,
        })
    }

    /// Copies `src` into this image with its top-left corner at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `src` does not fit at that offset.
    pub fn blit(&mut self, src: &RgbImage, x: u32, y: u32) -> Result<()> {
        let region = Rect::new(x, y, src.width, src.height);
        if !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                x,
                y,
                src.width,
                src.height,
                self.width,
                self.height,
            ));
        }

        let x0 = x as usize * CHANNELS;
        let row_len = src.stride();
        for sy in 0..src.height {
            self.row_mut(y + sy)[x0..x0 + row_len].copy_from_slice(src.row(sy));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        let data = (0..width * height * 3).map(|i| i as f32).collect();
        RgbImage::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let img = RgbImage::new(5, 4);
        assert_eq!(img.data().len(), 60);
        assert_eq!(img.shape(), [4, 5, 3]);
        assert!(img.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_data_length_check() {
        let err = RgbImage::from_data(2, 2, vec![0.0; 11]).unwrap_err();
        assert_eq!(err.expected_len(), Some(12));
        assert!(RgbImage::from_data(2, 2, vec![0.0; 12]).is_ok());
    }

    #[test]
    fn test_pixel_access() {
        let img = gradient(3, 2);
        assert_eq!(img.pixel(0, 0), [0.0, 1.0, 2.0]);
        assert_eq!(img.pixel(2, 1), [15.0, 16.0, 17.0]);
        assert_eq!(img.row(1), &img.data()[9..18]);
    }

    #[test]
    fn test_crop_copies_rows() {
        let img = gradient(4, 3);
        let crop = img.crop(Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(crop.size(), Size::new(2, 2));
        assert_eq!(crop.row(0), &img.row(1)[3..9]);
        assert_eq!(crop.row(1), &img.row(2)[3..9]);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let img = gradient(4, 3);
        let err = img.crop(Rect::new(2, 0, 3, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { rw: 3, width: 4, .. }));
    }

    #[test]
    fn test_blit_top_left() {
        let src = RgbImage::filled(2, 1, [1.0, 1.0, 1.0]);
        let mut dst = RgbImage::new(3, 2);
        dst.blit(&src, 0, 0).unwrap();
        assert_eq!(dst.pixel(1, 0), [1.0, 1.0, 1.0]);
        assert_eq!(dst.pixel(2, 0), [0.0, 0.0, 0.0]);
        assert_eq!(dst.pixel(0, 1), [0.0, 0.0, 0.0]);

        assert!(dst.blit(&src, 2, 0).is_err());
    }

    #[test]
    fn test_copy_from_slice_rejects_wrong_length() {
        let mut img = RgbImage::new(2, 2);
        assert!(img.copy_from_slice(&[1.0; 9]).is_err());
        assert!(img.data().iter().all(|&v| v == 0.0));
        img.copy_from_slice(&[1.0; 12]).unwrap();
        assert!(img.data().iter().all(|&v| v == 1.0));
    }
}
