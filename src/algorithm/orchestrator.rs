//! End-to-end mosaic generation from a decoded source and a tile directory

use crate::algorithm::compositor::Compositor;
use crate::catalog::{CandidateSelector, CatalogBuilder, CollisionPolicy, NearestColorMatcher};
use crate::color::{ColorMetric, EuclideanRgb};
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_TILE_PROPORTION_PERCENT};
use crate::io::error::{MosaicError, Result};
use crate::io::progress::ProgressManager;
use crate::spatial::{ColorGrid, TileSize};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// Parameters controlling tile sizing, catalog collisions, and matching
#[derive(Debug, Clone, Copy)]
pub struct MosaicConfig<M = EuclideanRgb> {
    /// Tile edge as a fraction of `width + height` of the source
    pub proportion: f64,
    /// How candidates sharing an average color are stored
    pub collision_policy: CollisionPolicy,
    /// Seed for choosing among equal-color candidates
    pub seed: u64,
    /// Distance used to match cell colors to catalog colors
    pub metric: M,
}

impl Default for MosaicConfig<EuclideanRgb> {
    fn default() -> Self {
        Self {
            proportion: DEFAULT_TILE_PROPORTION_PERCENT / 100.0,
            collision_policy: CollisionPolicy::default(),
            seed: DEFAULT_SEED,
            metric: EuclideanRgb,
        }
    }
}

impl<M: ColorMetric> MosaicConfig<M> {
    /// Set the tile proportion as a fraction
    #[must_use]
    pub const fn with_proportion(mut self, proportion: f64) -> Self {
        self.proportion = proportion;
        self
    }

    /// Set the collision policy
    #[must_use]
    pub const fn with_collision_policy(mut self, collision_policy: CollisionPolicy) -> Self {
        self.collision_policy = collision_policy;
        self
    }

    /// Set the candidate selection seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the matching metric
    #[must_use]
    pub fn with_metric<N: ColorMetric>(self, metric: N) -> MosaicConfig<N> {
        MosaicConfig {
            proportion: self.proportion,
            collision_policy: self.collision_policy,
            seed: self.seed,
            metric,
        }
    }
}

/// Observational figures for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Wall-clock time from tile sizing to the finished canvas
    pub elapsed: Duration,
    /// Number of tiles drawn onto the canvas
    pub tiles_placed: usize,
    /// Tile edge length used for the run
    pub tile_size: TileSize,
    /// Grid dimensions as (rows, cols)
    pub grid_dimensions: (usize, usize),
    /// Distinct average colors in the catalog
    pub catalog_colors: usize,
    /// Candidate images stored in the catalog
    pub catalog_images: usize,
    /// Files in the tile directory that were not decodable images
    pub skipped_files: usize,
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time to complete: {:.2?}", self.elapsed)?;
        writeln!(f, "Total tiles used: {}", self.tiles_placed)?;
        writeln!(f, "Tile size: {}", self.tile_size)?;
        writeln!(
            f,
            "Grid: {} rows x {} cols",
            self.grid_dimensions.0, self.grid_dimensions.1
        )?;
        writeln!(
            f,
            "Catalog: {} images, {} colors",
            self.catalog_images, self.catalog_colors
        )?;
        write!(f, "Skipped files: {}", self.skipped_files)
    }
}

/// Composited mosaic and the statistics of the run that produced it
#[derive(Debug, Clone)]
pub struct MosaicOutput {
    /// Output canvas cropped to whole tiles
    pub image: RgbaImage,
    /// Run statistics
    pub statistics: RunStatistics,
}

/// Sequences tile sizing, sampling, cataloguing, matching, and composition
pub struct MosaicGenerator<M = EuclideanRgb> {
    config: MosaicConfig<M>,
    progress: ProgressManager,
}

impl MosaicGenerator<EuclideanRgb> {
    /// Create a generator with default configuration and no progress output
    pub fn with_defaults() -> Self {
        Self::new(MosaicConfig::default())
    }
}

impl<M: ColorMetric> MosaicGenerator<M> {
    /// Create a generator with no progress output
    pub fn new(config: MosaicConfig<M>) -> Self {
        Self {
            config,
            progress: ProgressManager::hidden(),
        }
    }

    /// Report stage progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Active configuration
    pub const fn config(&self) -> &MosaicConfig<M> {
        &self.config
    }

    /// Build a mosaic of `source` from the images under `tile_directory`
    ///
    /// Grid sampling and catalog building have no dependency on each other
    /// and run concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size derived from the source and proportion is unusable
    ///   (`MosaicError::InvalidTileSize`)
    /// - The directory holds no decodable images (`MosaicError::EmptyCatalog`)
    /// - The directory cannot be read or composition fails
    pub fn generate(&self, source: &RgbaImage, tile_directory: &Path) -> Result<MosaicOutput> {
        let start_time = Instant::now();
        let (width, height) = source.dimensions();
        let tile_size = TileSize::from_proportion(width, height, self.config.proportion)?;
        log::info!("source {width}x{height}, tile size {tile_size}");

        let sampling_bar = self.progress.stage("Sampling");
        let catalog_bar = self.progress.stage("Cataloguing");

        let (grid, catalog) = rayon::join(
            || {
                let stage_start = Instant::now();
                let grid = ColorGrid::sample_with_progress(source, tile_size, &sampling_bar);
                ProgressManager::complete_stage(&sampling_bar, stage_start.elapsed());
                grid
            },
            || {
                let stage_start = Instant::now();
                let catalog = CatalogBuilder::new(tile_directory, tile_size)
                    .with_collision_policy(self.config.collision_policy)
                    .build_with_progress(&catalog_bar);
                ProgressManager::complete_stage(&catalog_bar, stage_start.elapsed());
                catalog
            },
        );
        let grid = grid?;
        let catalog = catalog?;

        if catalog.is_empty() {
            self.progress.finish();
            return Err(MosaicError::EmptyCatalog {
                directory: Some(tile_directory.to_path_buf()),
            });
        }

        let matcher = NearestColorMatcher::new(&catalog, &self.config.metric)?;
        let selector = CandidateSelector::new(self.config.seed);
        let compositor = Compositor::new(&grid, &catalog, &matcher, selector)?;

        let compose_bar = self.progress.stage("Compositing");
        let compose_start = Instant::now();
        let composition = compositor.compose_with_progress(&compose_bar)?;
        ProgressManager::complete_stage(&compose_bar, compose_start.elapsed());
        self.progress.finish();

        let statistics = RunStatistics {
            elapsed: start_time.elapsed(),
            tiles_placed: composition.tiles_placed,
            tile_size,
            grid_dimensions: grid.dimensions(),
            catalog_colors: catalog.len(),
            catalog_images: catalog.image_count(),
            skipped_files: catalog.skipped_files(),
        };
        log::info!(
            "placed {} tiles in {:.2?}",
            statistics.tiles_placed,
            statistics.elapsed
        );

        Ok(MosaicOutput {
            image: composition.canvas,
            statistics,
        })
    }

    /// Decode the source at `source_path` and build its mosaic
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::SourceImage` if the source cannot be read or
    /// decoded, otherwise the errors of [`Self::generate`]
    pub fn generate_from_path(
        &self,
        source_path: &Path,
        tile_directory: &Path,
    ) -> Result<MosaicOutput> {
        let source = crate::io::image::load_source_image(source_path)?;
        self.generate(&source, tile_directory)
    }
}
