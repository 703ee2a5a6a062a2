//! Error types for boxfit-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! region access:
//! - Buffer length not matching `width * height * 3`
//! - Zero-area or overflowing dimensions
//! - Regions falling outside the image
//!
//! # Usage
//!
//! ```rust
//! use boxfit_core::{Error, Result};
//!
//! fn check(len: usize, width: u32, height: u32) -> Result<()> {
//!     let expected = width as usize * height as usize * 3;
//!     if len != expected {
//!         return Err(Error::buffer_length(expected, len));
//!     }
//!     Ok(())
//! }
//! assert!(check(12, 2, 2).is_ok());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or slicing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Region of interest extends beyond image bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or dimensions would cause
    /// integer overflow in buffer size calculations.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel buffer length does not match the declared shape.
    #[error("buffer length mismatch: expected {expected} floats, got {got}")]
    BufferLength {
        /// Required number of `f32` elements
        expected: usize,
        /// Number of elements supplied
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferLength`] error.
    #[inline]
    pub fn buffer_length(expected: usize, got: usize) -> Self {
        Self::BufferLength { expected, got }
    }

    /// Returns the required buffer length for [`Error::BufferLength`].
    #[inline]
    pub fn expected_len(&self) -> Option<usize> {
        match self {
            Self::BufferLength { expected, .. } => Some(*expected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_region() {
        let err = Error::invalid_region(10, 20, 100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100x50"));
        assert!(msg.contains("80x60"));
        assert_eq!(err.expected_len(), None);
    }

    #[test]
    fn test_buffer_length() {
        let err = Error::buffer_length(300, 299);
        assert!(err.to_string().contains("300"));
        assert_eq!(err.expected_len(), Some(300));
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(0, 10, "zero width");
        assert_eq!(err.to_string(), "invalid dimensions: 0x10 (zero width)");
        assert_eq!(err.expected_len(), None);
    }
}
