//! Photo mosaic generation by average-color tile matching
//!
//! The source photo is cut into a grid of square cells, each cell is reduced to
//! its average color, and every cell is replaced by the candidate tile image
//! whose own average color is nearest in RGB space.

#![forbid(unsafe_code)]

/// Tile composition and end-to-end orchestration
pub mod algorithm;
/// Candidate tile catalog and nearest-color matching
pub mod catalog;
/// Color values, averaging, and distance metrics
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Tile sizing and grid sampling of the source image
pub mod spatial;

pub use algorithm::orchestrator::{MosaicConfig, MosaicGenerator, MosaicOutput, RunStatistics};
pub use io::error::{MosaicError, Result};
