//! # boxfit-ops
//!
//! Pre- and post-processing operations for fixed-input vision models.
//!
//! # Modules
//!
//! - [`geometry`] - Letterbox scale and padding math
//! - [`letterbox`] - Stateful resize-and-pad session with inverse crop
//! - [`resize`] - Separable resampling filters
//! - [`hsv`] - RGB/HSV conversion
//! - [`dominant`] - Dominant color estimation
//! - [`remap`] - Hue/saturation/value remapping
//! - [`host`] - Shape-array entry points for binding layers
//!
//! # Example
//!
//! ```rust
//! use boxfit_core::Size;
//! use boxfit_ops::{ColorRemapper, ColorTarget, Letterbox};
//!
//! let pixels = vec![0.5f32; 64 * 48 * 3];
//! let mut lb = Letterbox::new(pixels, Size::new(64, 48), Size::new(32, 32)).unwrap();
//! let canvas = lb.process().unwrap();
//! assert_eq!(canvas.shape(), [32, 32, 3]);
//!
//! let mut rgb = vec![200.0f32, 60.0, 60.0, 180.0, 70.0, 50.0];
//! ColorRemapper::default()
//!     .remap(&mut rgb, ColorTarget::Hue(120.0))
//!     .unwrap();
//! assert!(rgb[1] > rgb[0]);
//! ```
//!
//! # Features
//!
//! - `parallel` - per-pixel color passes on the rayon pool
//! - `serde` - derives for configuration and geometry types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod dominant;
pub mod geometry;
pub mod host;
pub mod hsv;
pub mod letterbox;
pub mod remap;
pub mod resize;

pub use error::{HsvChannel, OpsError, OpsResult};

pub use dominant::{DominantColorEstimator, KMeansCriteria};
pub use geometry::LetterboxGeometry;
pub use host::{HostArray, SessionHandle};
pub use letterbox::{Letterbox, LetterboxOptions, LetterboxState};
pub use remap::{ChannelFill, ColorRemapper, ColorTarget, DegeneratePolicy, RemapConfig};
pub use resize::Filter;
