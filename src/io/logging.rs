//! Terminal logger setup

use crate::io::error::Result;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Log level for a count of `-v` flags
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger writing to stderr
///
/// # Errors
///
/// Returns `MosaicError::Logging` if a logger is already installed
pub fn init_logging(level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}
