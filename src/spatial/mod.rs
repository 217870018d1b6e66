//! Spatial data structures for partitioning the source image
//!
//! This module contains spatial-related functionality including:
//! - Tile size derivation from source dimensions
//! - Grid sampling of representative colors

/// Grid of representative colors sampled from the source
pub mod grid;
/// Tile edge length derivation and arithmetic
pub mod tile_size;

pub use grid::ColorGrid;
pub use tile_size::TileSize;
