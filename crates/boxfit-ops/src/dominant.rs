//! Dominant color estimation.
//!
//! The dominant color of an HSV image is the center of a single k-means
//! cluster over all pixel triples. With one cluster, Lloyd iteration
//! converges in a single step to the centroid regardless of seeding, so the
//! estimator computes that centroid directly. [`KMeansCriteria`] is kept on
//! the estimator so configurations that tune the stopping rule stay valid.

use crate::{OpsError, OpsResult};
use boxfit_core::CHANNELS;
use tracing::debug;

/// Stopping rule for iterative clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KMeansCriteria {
    /// Maximum iterations per attempt.
    pub max_iter: u32,
    /// Stop once centers move less than this.
    pub epsilon: f64,
    /// Independent attempts; the most compact result wins.
    pub attempts: u32,
}

impl Default for KMeansCriteria {
    fn default() -> Self {
        Self {
            max_iter: 10,
            epsilon: 1.0,
            attempts: 10,
        }
    }
}

impl KMeansCriteria {
    /// Checks that the rule can terminate with a result.
    pub fn validate(&self) -> OpsResult<()> {
        if self.max_iter == 0 || self.attempts == 0 {
            return Err(OpsError::InvalidParameter(
                "k-means needs at least one iteration and one attempt".into(),
            ));
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "k-means epsilon must be >= 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Finds the representative (H, S, V) of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DominantColorEstimator {
    criteria: KMeansCriteria,
}

impl DominantColorEstimator {
    /// Creates an estimator with the given clustering criteria.
    pub fn new(criteria: KMeansCriteria) -> OpsResult<Self> {
        criteria.validate()?;
        Ok(Self { criteria })
    }

    /// Clustering criteria in use.
    #[inline]
    pub fn criteria(&self) -> &KMeansCriteria {
        &self.criteria
    }

    /// Returns the dominant `[H, S, V]` of an interleaved HSV buffer.
    ///
    /// Accumulates in `f64` so large images do not drift.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] for an empty buffer or one whose
    /// length is not a multiple of 3.
    ///
    /// ```rust
    /// use boxfit_ops::dominant::DominantColorEstimator;
    ///
    /// let hsv = [10.0, 0.2, 100.0, 30.0, 0.6, 200.0];
    /// let dom = DominantColorEstimator::default().estimate(&hsv).unwrap();
    /// assert_eq!(dom, [20.0, 0.4, 150.0]);
    /// ```
    pub fn estimate(&self, hsv: &[f32]) -> OpsResult<[f32; 3]> {
        if hsv.is_empty() || hsv.len() % CHANNELS != 0 {
            return Err(OpsError::InvalidDimensions(format!(
                "cannot estimate dominant color of {} floats",
                hsv.len()
            )));
        }

        let mut sum = [0.0f64; 3];
        for px in hsv.chunks_exact(CHANNELS) {
            for (acc, &v) in sum.iter_mut().zip(px) {
                *acc += v as f64;
            }
        }

        let n = (hsv.len() / CHANNELS) as f64;
        let center = sum.map(|s| (s / n) as f32);
        debug!(h = center[0], s = center[1], v = center[2], "dominant color");
        Ok(center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centroid() {
        let hsv = vec![
            0.0, 0.0, 0.0, //
            90.0, 0.5, 100.0, //
            180.0, 1.0, 200.0, //
            90.0, 0.5, 100.0,
        ];
        let dom = DominantColorEstimator::default().estimate(&hsv).unwrap();
        assert_abs_diff_eq!(dom[0], 90.0);
        assert_abs_diff_eq!(dom[1], 0.5);
        assert_abs_diff_eq!(dom[2], 100.0);
    }

    #[test]
    fn test_uniform_image() {
        let hsv: Vec<f32> = [42.0, 0.3, 17.0].repeat(1000);
        let dom = DominantColorEstimator::default().estimate(&hsv).unwrap();
        assert_abs_diff_eq!(dom[0], 42.0, epsilon = 1e-4);
        assert_abs_diff_eq!(dom[1], 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(dom[2], 17.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        let est = DominantColorEstimator::default();
        assert!(est.estimate(&[]).is_err());
        assert!(est.estimate(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_criteria_validation() {
        assert_eq!(
            *DominantColorEstimator::default().criteria(),
            KMeansCriteria {
                max_iter: 10,
                epsilon: 1.0,
                attempts: 10
            }
        );
        let bad = KMeansCriteria {
            attempts: 0,
            ..Default::default()
        };
        assert!(DominantColorEstimator::new(bad).is_err());
        let nan = KMeansCriteria {
            epsilon: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
