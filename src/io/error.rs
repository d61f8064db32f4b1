//! Error types and path context for tiling operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TilingError {
    /// Failed to read or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or write an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pixel data doesn't meet tiling requirements
    InvalidSourceData {
        /// Description of what's wrong with the pixel data
        reason: String,
    },

    /// A file name does not carry a tile origin
    TileNameDecode {
        /// The file name that failed to decode
        name: String,
    },

    /// No decodable tiles were found for an image
    EmptyResult {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Two input images would share one tile directory
    DuplicateStem {
        /// Image that was not split
        path: PathBuf,
        /// Earlier image that owns the stem
        first: PathBuf,
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

    /// The per-tile transform failed or broke the tile's shape
    Transform {
        /// File name or origin of the tile being transformed
        tile: String,
        /// Description of the failure
        reason: String,
    },

    /// Internal array conversion produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A batch finished with per-item failures
    BatchIncomplete {
        /// Number of failed items across all stages
        failed: usize,
    },
}

impl TilingError {
    /// Whether this error means "nothing to do here" rather than a failure
    ///
    /// Undecodable tile names and images without tiles are skipped by the
    /// batch driver and counted separately from failures.
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::TileNameDecode { .. } | Self::EmptyResult { .. })
    }
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
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
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::TileNameDecode { name } => {
                write!(f, "File name '{name}' does not encode a tile origin")
            }
            Self::EmptyResult { path } => {
                write!(f, "No tiles found in '{}'", path.display())
            }
            Self::DuplicateStem { path, first } => {
                write!(
                    f,
                    "Image '{}' has the same stem as '{}'",
                    path.display(),
                    first.display()
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
            Self::Transform { tile, reason } => {
                write!(f, "Transform failed for tile '{tile}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::BatchIncomplete { failed } => {
                write!(f, "Batch finished with {failed} failed item(s)")
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> TilingError {
    TilingError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a file system error for `operation` on `path`
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> TilingError {
    TilingError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}
