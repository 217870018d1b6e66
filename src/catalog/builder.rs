//! Candidate tile catalog keyed by representative color
//!
//! Candidate files are enumerated recursively in file-name order, decoded and
//! resized in parallel, then inserted sequentially so the resulting catalog
//! only depends on directory contents.

use crate::color::{Color, average_color};
use crate::io::configuration::TILE_RESIZE_FILTER;
use crate::io::error::{Result, computation_error, file_system_error};
use crate::spatial::TileSize;
use image::{ImageReader, RgbaImage, imageops};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How candidates with an identical average color are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep every candidate and choose among them per cell
    #[default]
    KeepAll,
    /// Keep the first candidate in file-name order
    KeepFirst,
    /// Keep the last candidate in file-name order
    KeepLast,
}

/// Resized candidate images indexed by their average color
///
/// Keys are unique and iterate in ascending (R, G, B, A) order. Every stored
/// image is exactly `tile_size × tile_size` pixels.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    entries: BTreeMap<Color, Vec<RgbaImage>>,
    tile_size: TileSize,
    directory: Option<PathBuf>,
    skipped_files: usize,
}

impl TileCatalog {
    /// Create an empty in-memory catalog
    pub const fn new(tile_size: TileSize) -> Self {
        Self {
            entries: BTreeMap::new(),
            tile_size,
            directory: None,
            skipped_files: 0,
        }
    }

    /// Insert a tile under its average color, resizing it if needed
    ///
    /// Returns the color the tile was stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn insert(&mut self, image: &RgbaImage, policy: CollisionPolicy) -> Result<Color> {
        let side = self.tile_size.get();
        if image.width() == 0 || image.height() == 0 {
            return Err(computation_error(
                "catalog insertion",
                &"candidate image contains no pixels",
            ));
        }
        let tile = if image.dimensions() == (side, side) {
            image.clone()
        } else {
            imageops::resize(image, side, side, TILE_RESIZE_FILTER)
        };
        let color = average_color(&tile)?;
        self.insert_prepared(color, tile, policy);
        Ok(color)
    }

    fn insert_prepared(&mut self, color: Color, tile: RgbaImage, policy: CollisionPolicy) {
        let candidates = self.entries.entry(color).or_default();
        if !candidates.is_empty() {
            log::trace!("average color {color} shared by several candidates");
        }
        match policy {
            CollisionPolicy::KeepAll => candidates.push(tile),
            CollisionPolicy::KeepFirst => {
                if candidates.is_empty() {
                    candidates.push(tile);
                }
            }
            CollisionPolicy::KeepLast => {
                candidates.clear();
                candidates.push(tile);
            }
        }
    }

    /// Number of distinct average colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no candidates were catalogued
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of stored candidate images
    pub fn image_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Average colors in ascending order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.keys().copied()
    }

    /// Candidate images stored under `color`
    pub fn candidates(&self, color: Color) -> Option<&[RgbaImage]> {
        self.entries.get(&color).map(Vec::as_slice)
    }

    /// Tile size every candidate was resized to
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Directory the catalog was scanned from, if any
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Number of files that could not be decoded as images
    pub const fn skipped_files(&self) -> usize {
        self.skipped_files
    }
}

/// Scans a directory tree and builds a `TileCatalog`
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    directory: PathBuf,
    tile_size: TileSize,
    policy: CollisionPolicy,
}

impl CatalogBuilder {
    /// Create a builder for `directory` producing tiles of `tile_size`
    pub fn new(directory: impl Into<PathBuf>, tile_size: TileSize) -> Self {
        Self {
            directory: directory.into(),
            tile_size,
            policy: CollisionPolicy::default(),
        }
    }

    /// Set how equal-color candidates are stored
    #[must_use]
    pub const fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be read
    pub fn build(&self) -> Result<TileCatalog> {
        self.build_with_progress(&ProgressBar::hidden())
    }

    /// Build the catalog while advancing `progress` once per file
    ///
    /// Files that fail to decode are skipped and counted; they never abort
    /// the scan. An empty result is returned as-is and left for the caller
    /// to reject.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be read
    pub fn build_with_progress(&self, progress: &ProgressBar) -> Result<TileCatalog> {
        let files = self.collect_files()?;
        progress.set_length(files.len() as u64);

        let side = self.tile_size.get();
        let prepared: Vec<Option<(Color, RgbaImage)>> = files
            .par_iter()
            .map(|path| {
                let candidate = load_candidate(path, side);
                progress.inc(1);
                candidate
            })
            .collect();

        let mut catalog = TileCatalog::new(self.tile_size);
        catalog.directory = Some(self.directory.clone());
        for entry in prepared {
            match entry {
                Some((color, tile)) => catalog.insert_prepared(color, tile, self.policy),
                None => catalog.skipped_files += 1,
            }
        }

        log::info!(
            "catalogued {} images under {} colors from '{}' ({} skipped)",
            catalog.image_count(),
            catalog.len(),
            self.directory.display(),
            catalog.skipped_files
        );

        Ok(catalog)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.directory).sort_by_file_name() {
            match entry {
                // Links are not followed during the walk; a link to a
                // directory fails to decode and is counted as skipped
                Ok(entry) => {
                    if entry.file_type().is_file() || entry.path_is_symlink() {
                        files.push(entry.into_path());
                    }
                }
                Err(err) if err.depth() == 0 => {
                    return Err(file_system_error(
                        &self.directory,
                        "read tile directory",
                        err.into(),
                    ));
                }
                Err(err) => log::warn!("skipping unreadable entry: {err}"),
            }
        }
        Ok(files)
    }
}

// Decode failures mean the file is not a usable candidate
fn load_candidate(path: &Path, side: u32) -> Option<(Color, RgbaImage)> {
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(image::ImageError::IoError)
        .and_then(ImageReader::decode);

    let image = match decoded {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            log::debug!("skipping '{}': {err}", path.display());
            return None;
        }
    };

    let tile = imageops::resize(&image, side, side, TILE_RESIZE_FILTER);
    match average_color(&tile) {
        Ok(color) => Some((color, tile)),
        Err(err) => {
            log::debug!("skipping '{}': {err}", path.display());
            None
        }
    }
}
