//! Color values, aggregation, and distance metrics
//!
//! This module contains color-related functionality including:
//! - The exact RGBA color used as a catalog key
//! - Averaging an image region to a single color
//! - Pluggable distance metrics for matching

/// Region averaging
pub mod aggregate;
/// Distance metrics between colors
pub mod metric;
/// Exact RGBA color value
pub mod rgba;

pub use aggregate::average_color;
pub use metric::{ColorMetric, EuclideanRgb, LuminanceWeighted};
pub use rgba::Color;
