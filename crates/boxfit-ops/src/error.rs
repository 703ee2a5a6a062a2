//! Error types for letterbox and color operations.

use thiserror::Error;

/// HSV channel named in [`OpsError::DegenerateColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    /// Saturation.
    Saturation,
    /// Value.
    Value,
}

impl std::fmt::Display for HsvChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HsvChannel::Saturation => "saturation",
            HsvChannel::Value => "value",
        })
    }
}

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Wrong or missing argument at the host boundary.
    #[error("argument error: {0}")]
    ArgumentType(String),

    /// Input buffer does not have the required number of floats.
    #[error("size mismatch: buffer must be Float32Array({expected}), got {got} elements")]
    SizeMismatch {
        /// Required number of `f32` elements.
        expected: usize,
        /// Number of elements supplied.
        got: usize,
    },

    /// Target canvas has a zero or negative dimension.
    #[error("invalid target shape: {width}x{height} (both sides must be > 0)")]
    InvalidTargetShape {
        /// Requested target width.
        width: i64,
        /// Requested target height.
        height: i64,
    },

    /// Dominant color sits on a domain bound of a remapped channel.
    #[error("degenerate dominant {channel} {value} (must lie strictly inside 0..{max})")]
    DegenerateColor {
        /// Channel whose pivot is degenerate.
        channel: HsvChannel,
        /// Dominant value of that channel.
        value: f32,
        /// Upper bound of the channel domain.
        max: f32,
    },

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the core buffer types.
    #[error(transparent)]
    Core(#[from] boxfit_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Returns the required buffer length for size errors, so the caller can
    /// retry with correctly sized data.
    pub fn expected_len(&self) -> Option<usize> {
        match self {
            Self::SizeMismatch { expected, .. } => Some(*expected),
            Self::Core(err) => err.expected_len(),
            _ => None,
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
