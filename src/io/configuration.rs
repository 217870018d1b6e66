//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

/// Default tile edge as a percentage of `width + height` of the source
pub const DEFAULT_TILE_PROPORTION_PERCENT: f64 = 0.3;

/// Default path of the written mosaic
pub const DEFAULT_OUTPUT_PATH: &str = "out.jpg";

/// Fixed seed for reproducible candidate choice among equal-color tiles
pub const DEFAULT_SEED: u64 = 42;

// Triangle is bilinear interpolation in the image crate
/// Interpolation used when shrinking candidate images to tile size
pub const TILE_RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Rec. 601 luma weights for the red, green, and blue channels
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Number of bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;
