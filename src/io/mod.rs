//! Input/output operations: command line, image files, logging, progress, and errors

/// Command-line parsing and the mosaic job runner
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Source decoding and mosaic export
pub mod image;
/// Terminal logger setup
pub mod logging;
/// Per-stage progress bars
pub mod progress;
