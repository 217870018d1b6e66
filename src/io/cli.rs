//! Command-line interface for building a mosaic from a photo and a tile folder

use crate::algorithm::orchestrator::{MosaicConfig, MosaicGenerator, MosaicOutput};
use crate::catalog::CollisionPolicy;
use crate::color::{ColorMetric, EuclideanRgb, LuminanceWeighted};
use crate::io::configuration::{DEFAULT_OUTPUT_PATH, DEFAULT_SEED, DEFAULT_TILE_PROPORTION_PERCENT};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{load_source_image, save_mosaic};
use crate::io::progress::ProgressManager;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Storage policy for candidates sharing an average color
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Keep every candidate and pick one per cell
    KeepAll,
    /// Keep the first candidate in file-name order
    KeepFirst,
    /// Keep the last candidate in file-name order
    KeepLast,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::KeepAll => Self::KeepAll,
            CollisionArg::KeepFirst => Self::KeepFirst,
            CollisionArg::KeepLast => Self::KeepLast,
        }
    }
}

/// Color distance used for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Euclidean distance over red, green, and blue
    Euclidean,
    /// Euclidean distance scaled by luma weights
    Luminance,
}

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild a photo out of tile images matched by average color"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Photo the mosaic is based on
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Folder of images used as mosaic tiles (searched recursively)
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Where to write the mosaic; the extension selects the format
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Tile edge as a percentage of source width + height
    #[arg(short, long, default_value_t = DEFAULT_TILE_PROPORTION_PERCENT)]
    pub proportion: f64,

    /// Seed for choosing among tiles with the same average color
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// How tiles with the same average color are kept
    #[arg(short, long, value_enum, default_value_t = CollisionArg::KeepAll)]
    pub collisions: CollisionArg,

    /// Color distance used for matching
    #[arg(short, long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Suppress progress bars and the statistics report
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Tile proportion as a fraction of `width + height`
    pub fn proportion_fraction(&self) -> f64 {
        self.proportion / 100.0
    }

    /// Check that the source is a file and the tile folder a directory
    ///
    /// # Errors
    ///
    /// Returns an error naming which path is invalid and why
    pub fn validate_paths(&self) -> Result<()> {
        validate_path(&self.source, "source", PathKind::File)?;
        validate_path(&self.tiles, "tiles", PathKind::Directory)
    }
}

#[derive(Clone, Copy)]
enum PathKind {
    File,
    Directory,
}

fn validate_path(path: &Path, parameter: &'static str, kind: PathKind) -> Result<()> {
    let display = path.display();
    let metadata = std::fs::metadata(path)
        .map_err(|e| invalid_parameter(parameter, &display, &format!("invalid path: {e}")))?;
    match kind {
        PathKind::File if metadata.is_dir() => {
            Err(invalid_parameter(parameter, &display, &"not a file"))
        }
        PathKind::Directory if !metadata.is_dir() => {
            Err(invalid_parameter(parameter, &display, &"not a dir"))
        }
        _ => Ok(()),
    }
}

/// Runs one mosaic job described by the command line
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this runner was built from
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Validate inputs, build the mosaic, write it, and report statistics
    ///
    /// Nothing is written when any step fails.
    ///
    /// # Errors
    ///
    /// Returns an error if path validation, decoding, generation, or export
    /// fails
    pub fn process(&self) -> Result<MosaicOutput> {
        self.cli.validate_paths()?;
        let source = load_source_image(&self.cli.source)?;

        let config = MosaicConfig::default()
            .with_proportion(self.cli.proportion_fraction())
            .with_collision_policy(self.cli.collisions.into())
            .with_seed(self.cli.seed);

        let output = match self.cli.metric {
            MetricArg::Euclidean => self.generate(config.with_metric(EuclideanRgb), &source)?,
            MetricArg::Luminance => {
                self.generate(config.with_metric(LuminanceWeighted::default()), &source)?
            }
        };

        save_mosaic(&output.image, &self.cli.output)?;
        self.report(&output);
        Ok(output)
    }

    fn generate<M: ColorMetric>(
        &self,
        config: MosaicConfig<M>,
        source: &image::RgbaImage,
    ) -> Result<MosaicOutput> {
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        MosaicGenerator::new(config)
            .with_progress(progress)
            .generate(source, &self.cli.tiles)
    }

    // Allow print for the user-facing statistics report
    #[allow(clippy::print_stdout)]
    fn report(&self, output: &MosaicOutput) {
        if self.cli.quiet {
            return;
        }
        println!("{}", output.statistics);
        println!("finished");
    }
}
