//! Distance metrics between colors
//!
//! Matching uses only the red, green, and blue channels; alpha never
//! contributes to a distance.

use crate::color::Color;
use crate::io::configuration::LUMINANCE_WEIGHTS;
use crate::io::error::{Result, invalid_parameter};

/// A distance between two colors used by the nearest-color matcher
///
/// Implementations must be symmetric and return zero for identical RGB
/// channels. Only the ordering of distances is observable.
pub trait ColorMetric: Send + Sync {
    /// Distance between `a` and `b`
    fn distance(&self, a: Color, b: Color) -> f64;
}

impl<M: ColorMetric + ?Sized> ColorMetric for &M {
    fn distance(&self, a: Color, b: Color) -> f64 {
        (**self).distance(a, b)
    }
}

/// Straight-line distance in RGB space
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanRgb;

impl ColorMetric for EuclideanRgb {
    fn distance(&self, a: Color, b: Color) -> f64 {
        rgb_distance(a, b)
    }
}

/// Euclidean distance with each channel scaled by its Rec. 601 luma weight
#[derive(Debug, Clone, Copy)]
pub struct LuminanceWeighted {
    weights: [f64; 3],
}

impl Default for LuminanceWeighted {
    fn default() -> Self {
        Self {
            weights: LUMINANCE_WEIGHTS,
        }
    }
}

impl LuminanceWeighted {
    /// Create a metric with custom red, green, and blue weights
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::InvalidParameter` if any weight is negative or
    /// not finite, since such weights can make distances NaN
    pub fn with_weights(weights: [f64; 3]) -> Result<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid_parameter(
                "weights",
                &format!("{weights:?}"),
                &"every weight must be finite and non-negative",
            ));
        }
        Ok(Self { weights })
    }

    /// Red, green, and blue weights in use
    pub const fn weights(&self) -> [f64; 3] {
        self.weights
    }
}

impl ColorMetric for LuminanceWeighted {
    fn distance(&self, a: Color, b: Color) -> f64 {
        a.rgb_f64()
            .iter()
            .zip(b.rgb_f64().iter())
            .zip(self.weights.iter())
            .map(|((x, y), w)| w * (y - x).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// Euclidean distance over the red, green, and blue channels
pub fn rgb_distance(a: Color, b: Color) -> f64 {
    let dr = f64::from(b.r) - f64::from(a.r);
    let dg = f64::from(b.g) - f64::from(a.g);
    let db = f64::from(b.b) - f64::from(a.b);
    db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
}
