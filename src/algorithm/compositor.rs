//! Placement of matched candidate tiles onto the output canvas
//!
//! Each grid row owns one horizontal band of the canvas, `tile_size` pixel
//! rows tall. Bands never overlap, so they are filled in parallel without
//! synchronization beyond the placement counter.

use crate::catalog::{CandidateSelector, NearestColorMatcher, TileCatalog};
use crate::color::{Color, ColorMetric};
use crate::io::configuration::BYTES_PER_PIXEL;
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::ColorGrid;
use image::RgbaImage;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Finished canvas with the number of tiles drawn onto it
#[derive(Debug, Clone)]
pub struct Composition {
    /// Output image cropped to whole tiles
    pub canvas: RgbaImage,
    /// Number of tiles copied onto the canvas
    pub tiles_placed: usize,
}

/// Draws the nearest catalog tile into every grid cell
pub struct Compositor<'a, M: ColorMetric> {
    grid: &'a ColorGrid,
    catalog: &'a TileCatalog,
    matcher: &'a NearestColorMatcher<M>,
    selector: CandidateSelector,
}

impl<'a, M: ColorMetric> Compositor<'a, M> {
    /// Create a compositor over a sampled grid and a matching catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the grid and catalog were built for different
    /// tile sizes
    pub fn new(
        grid: &'a ColorGrid,
        catalog: &'a TileCatalog,
        matcher: &'a NearestColorMatcher<M>,
        selector: CandidateSelector,
    ) -> Result<Self> {
        if grid.tile_size() != catalog.tile_size() {
            return Err(invalid_parameter(
                "tile_size",
                &catalog.tile_size(),
                &format!("catalog does not match grid tile size {}", grid.tile_size()),
            ));
        }
        Ok(Self {
            grid,
            catalog,
            matcher,
            selector,
        })
    }

    /// Compose the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if a matched color has no candidate in the catalog
    /// or a candidate does not have the tile dimensions
    pub fn compose(&self) -> Result<Composition> {
        self.compose_with_progress(&ProgressBar::hidden())
    }

    /// Compose the mosaic while advancing `progress` once per grid row
    ///
    /// # Errors
    ///
    /// Returns an error if a matched color has no candidate in the catalog
    /// or a candidate does not have the tile dimensions
    pub fn compose_with_progress(&self, progress: &ProgressBar) -> Result<Composition> {
        let (width, height) = self.grid.pixel_dimensions();
        let mut canvas = RgbaImage::new(width, height);
        progress.set_length(self.grid.rows() as u64);

        if self.grid.is_empty() {
            return Ok(Composition {
                canvas,
                tiles_placed: 0,
            });
        }

        let side = self.grid.tile_size().get() as usize;
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let band_bytes = row_bytes * side;
        let cols = self.grid.cols();
        let placed = AtomicUsize::new(0);

        let buffer: &mut [u8] = &mut canvas;
        buffer
            .par_chunks_mut(band_bytes)
            .enumerate()
            .try_for_each(|(row, band)| -> Result<()> {
                for col in 0..cols {
                    let target = self.grid.get(row, col).ok_or_else(|| {
                        computation_error("composition", &format!("missing cell ({row}, {col})"))
                    })?;
                    let tile = self.tile_for(target, row * cols + col)?;
                    blit_into_band(band, tile, col, side)?;
                    placed.fetch_add(1, Ordering::Relaxed);
                }
                progress.inc(1);
                Ok(())
            })?;

        Ok(Composition {
            canvas,
            tiles_placed: placed.into_inner(),
        })
    }

    /// Candidate tile drawn for a cell whose average color is `target`
    ///
    /// # Errors
    ///
    /// Returns an error if the matched color has no stored candidate
    pub fn tile_for(&self, target: Color, cell_index: usize) -> Result<&'a RgbaImage> {
        let color = self.matcher.nearest(target);
        self.catalog
            .candidates(color)
            .and_then(|candidates| self.selector.choose(cell_index, candidates))
            .ok_or_else(|| {
                computation_error(
                    "composition",
                    &format!("matched color {color} has no candidate tile"),
                )
            })
    }
}

// Source-replace copy of a `side`-pixel square tile into column `col` of a band
fn blit_into_band(band: &mut [u8], tile: &RgbaImage, col: usize, side: usize) -> Result<()> {
    if tile.width() as usize != side || tile.height() as usize != side || side == 0 {
        return Err(computation_error(
            "composition",
            &format!(
                "candidate {}x{} does not fit a {side}px cell",
                tile.width(),
                tile.height()
            ),
        ));
    }

    let tile_row_bytes = side * BYTES_PER_PIXEL;
    let row_bytes = band.len() / side;
    let start = col * tile_row_bytes;
    let end = start + tile_row_bytes;

    for (source, destination) in tile
        .as_raw()
        .chunks_exact(tile_row_bytes)
        .zip(band.chunks_exact_mut(row_bytes))
    {
        let span = destination.get_mut(start..end).ok_or_else(|| {
            computation_error("composition", &format!("column {col} lies outside the canvas"))
        })?;
        span.copy_from_slice(source);
    }
    Ok(())
}
