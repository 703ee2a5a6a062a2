//! # boxfit-core
//!
//! Core types for model-input preprocessing.
//!
//! This crate provides the foundational types used throughout boxfit:
//!
//! - [`RgbImage`] - Owned 3-channel `f32` pixel buffer, row-major, interleaved
//! - [`Size`] - Width/height pair used for all internal geometry
//! - [`Rect`] - Region of interest used for crops and blits
//! - [`Error`] - Buffer and region errors
//!
//! ## Axis Order
//!
//! Every type in this crate reasons in `(width, height)`. Callers that hand
//! over `[height, width]` shape arrays convert at the boundary with
//! [`Size::from_shape`], and read shapes back with [`RgbImage::shape`],
//! which reports `[height, width, 3]`.
//!
//! ```text
//! boxfit-core (this crate)
//!    ^
//!    |
//!    +-- boxfit-ops (resize, letterbox, hsv remap)
//!    +-- boxfit-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`Size`] and [`Rect`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use image::{CHANNELS, RgbImage};
pub use rect::{Rect, Size};

