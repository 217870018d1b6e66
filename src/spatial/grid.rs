//! Subdivision of the source image into a grid of representative colors
//!
//! Every cell is an independent square region of the source, so cells are
//! averaged in parallel. Pixels past the last whole tile in either direction
//! are never sampled.

use crate::color::{Color, average_color};
use crate::io::error::{Result, computation_error};
use crate::spatial::TileSize;
use image::{GenericImageView, RgbaImage};
use indicatif::ProgressBar;
use ndarray::Array2;
use rayon::prelude::*;

/// Representative colors of every whole tile in a source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    /// Average color per cell (indexed by `row`, `col`)
    cells: Array2<Color>,
    tile_size: TileSize,
}

impl ColorGrid {
    /// Sample `image` into cells of `tile_size`
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be averaged or the collected colors
    /// do not fill the grid shape
    pub fn sample(image: &RgbaImage, tile_size: TileSize) -> Result<Self> {
        Self::sample_with_progress(image, tile_size, &ProgressBar::hidden())
    }

    /// Sample `image` while advancing `progress` once per finished cell
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be averaged or the collected colors
    /// do not fill the grid shape
    pub fn sample_with_progress(
        image: &RgbaImage,
        tile_size: TileSize,
        progress: &ProgressBar,
    ) -> Result<Self> {
        let rows = tile_size.tiles_in(image.height());
        let cols = tile_size.tiles_in(image.width());
        let side = tile_size.get();
        let cell_count = rows as usize * cols as usize;
        progress.set_length(cell_count as u64);

        let colors = (0..cell_count)
            .into_par_iter()
            .map(|index| {
                let row = (index / cols as usize) as u32;
                let col = (index % cols as usize) as u32;
                let cell = image.view(tile_size.offset(col), tile_size.offset(row), side, side);
                let color = average_color(&*cell);
                progress.inc(1);
                color
            })
            .collect::<Result<Vec<Color>>>()?;

        let cells = Array2::from_shape_vec((rows as usize, cols as usize), colors)
            .map_err(|e| computation_error("grid sampling", &e))?;

        log::debug!("sampled {rows}x{cols} grid at tile size {tile_size}");

        Ok(Self { cells, tile_size })
    }

    /// Build a grid directly from precomputed cell colors
    pub const fn from_cells(cells: Array2<Color>, tile_size: TileSize) -> Self {
        Self { cells, tile_size }
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Color of the cell at (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get((row, col)).copied()
    }

    /// All cell colors
    pub const fn cells(&self) -> &Array2<Color> {
        &self.cells
    }

    /// Tile size the grid was sampled with
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Pixel dimensions (width, height) covered by whole tiles
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        let side = self.tile_size.get();
        (self.cols() as u32 * side, self.rows() as u32 * side)
    }
}
