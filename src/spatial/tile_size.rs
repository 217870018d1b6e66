//! Tile edge length derived from the source image dimensions

use crate::io::error::{MosaicError, Result, invalid_parameter};
use std::fmt;
use std::num::NonZeroU32;

/// Edge length in pixels shared by every grid cell and candidate tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileSize(NonZeroU32);

impl TileSize {
    /// Wrap an explicit edge length
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is zero
    pub fn new(pixels: u32) -> Result<Self> {
        NonZeroU32::new(pixels)
            .map(Self)
            .ok_or_else(|| invalid_parameter("tile_size", &pixels, &"must be at least 1 pixel"))
    }

    /// Derive the tile size as `floor((width + height) * proportion)`
    ///
    /// `proportion` is a fraction, so `0.003` means 0.3% of the summed
    /// dimensions. A result larger than the smaller source dimension would
    /// leave an empty grid and is rejected alongside a zero result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `proportion` is not a finite positive number
    /// - The derived size rounds down to zero
    /// - The derived size exceeds the width or height of the source
    pub fn from_proportion(width: u32, height: u32, proportion: f64) -> Result<Self> {
        if !proportion.is_finite() || proportion <= 0.0 {
            return Err(invalid_parameter(
                "proportion",
                &proportion,
                &"must be a finite positive fraction",
            ));
        }

        let invalid = |reason: String| MosaicError::InvalidTileSize {
            width,
            height,
            proportion,
            reason,
        };

        let raw = ((f64::from(width) + f64::from(height)) * proportion).floor();
        if raw < 1.0 {
            return Err(invalid(format!("derived size {raw} is below 1 pixel")));
        }
        if raw > f64::from(width.min(height)) {
            return Err(invalid(format!(
                "derived size {raw} exceeds the smaller source dimension"
            )));
        }

        let pixels = raw as u32;
        NonZeroU32::new(pixels)
            .map(Self)
            .ok_or_else(|| invalid(format!("derived size {pixels} is below 1 pixel")))
    }

    /// Edge length in pixels
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Number of whole tiles that fit in `extent` pixels
    pub const fn tiles_in(self, extent: u32) -> u32 {
        extent / self.0.get()
    }

    /// Pixel offset of the tile at `index`
    pub const fn offset(self, index: u32) -> u32 {
        index * self.0.get()
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}
