//! CLI entry point for the photo mosaic generator

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};
use photomosaic::io::logging::{init_logging, level_for_verbosity};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(level_for_verbosity(cli.verbose))?;
    MosaicRunner::new(cli).process()?;
    Ok(())
}
