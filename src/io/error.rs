//! Error types for mosaic construction and the surrounding I/O layer

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Tile size derived from the source dimensions cannot be used
    InvalidTileSize {
        /// Source image width in pixels
        width: u32,
        /// Source image height in pixels
        height: u32,
        /// Fraction of `width + height` requested per tile
        proportion: f64,
        /// Explanation of why the derived size is unusable
        reason: String,
    },

    /// No usable candidate images were found
    EmptyCatalog {
        /// Directory that was scanned, if the catalog came from disk
        directory: Option<PathBuf>,
    },

    /// Source photograph could not be read or decoded
    SourceImage {
        /// Path to the source image
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the composited mosaic
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Global logger was already installed
    Logging {
        /// Underlying logger error
        source: log::SetLoggerError,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize {
                width,
                height,
                proportion,
                reason,
            } => {
                write!(
                    f,
                    "Invalid tile size for {width}x{height} source at proportion {proportion}: {reason}"
                )
            }
            Self::EmptyCatalog { directory } => match directory {
                Some(path) => write!(
                    f,
                    "No usable tile images found in '{}'",
                    path.display()
                ),
                None => write!(f, "Tile catalog is empty"),
            },
            Self::SourceImage { path, source } => {
                write!(
                    f,
                    "Failed to load source image '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::Logging { source } => write!(f, "Failed to initialize logging: {source}"),
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceImage { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logging { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::SourceImage {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<log::SetLoggerError> for MosaicError {
    fn from(err: log::SetLoggerError) -> Self {
        Self::Logging { source: err }
    }
}

impl MosaicError {
    /// Whether the error is one of the fatal preconditions of a mosaic run
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidTileSize { .. } | Self::EmptyCatalog { .. } | Self::SourceImage { .. }
        )
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}
