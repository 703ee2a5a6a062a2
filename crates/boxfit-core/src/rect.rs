//! Size and rectangle types for image geometry.
//!
//! - [`Size`] - Width/height pair, the unit of all letterbox math
//! - [`Rect`] - Origin plus size, used for crops and blits
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Image   │
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use boxfit_core::{Rect, Size};
//!
//! // Shapes arrive as [height, width]
//! let size = Size::from_shape([480, 640]);
//! assert_eq!(size, Size::new(640, 480));
//!
//! let rect = Rect::from_size(size.width, size.height);
//! assert_eq!((rect.right(), rect.bottom()), (640, 480));
//! ```

/// Image dimensions in pixels, always ordered `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Creates a size from width and height.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a size from a row-major `[height, width]` shape.
    ///
    /// ```rust
    /// use boxfit_core::Size;
    ///
    /// let size = Size::from_shape([100, 200]);
    /// assert_eq!(size.width, 200);
    /// assert_eq!(size.height, 100);
    /// ```
    #[inline]
    pub const fn from_shape(shape: [u32; 2]) -> Self {
        Self::new(shape[1], shape[0])
    }

    /// Returns the number of pixels.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the number of `f32` elements in a 3-channel buffer of this size.
    ///
    /// Returns `None` on overflow.
    #[inline]
    pub fn buffer_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(crate::CHANNELS))
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// The rectangle is inclusive on the left/top edges and exclusive on the
/// right/bottom edges.
///
/// # Example
///
/// ```rust
/// use boxfit_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_shape_order() {
        let s = Size::from_shape([100, 200]);
        assert_eq!(s.width, 200);
        assert_eq!(s.height, 100);
        assert_eq!(s.to_string(), "200x100");
    }

    #[test]
    fn test_size_buffer_len() {
        assert_eq!(Size::new(4, 3).buffer_len(), Some(36));
        assert_eq!(Size::new(0, 3).buffer_len(), Some(0));
        assert!(Size::new(0, 5).is_empty());
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
    }

    #[test]
    fn test_rect_contains_rect() {
        let r = Rect::new(10, 10, 100, 100);
        assert!(r.contains_rect(&Rect::new(10, 10, 100, 100)));
        assert!(r.contains_rect(&Rect::new(20, 30, 5, 5)));
        assert!(!r.contains_rect(&Rect::new(0, 10, 100, 100)));
        assert!(!r.contains_rect(&Rect::new(60, 60, 51, 10)));
    }
}
