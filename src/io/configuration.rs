//! Tiling constants and runtime configuration defaults

// Defaults for configurable parameters
/// Default edge length of a square tile in pixels
pub const DEFAULT_TILE_SIZE: u32 = 1024;

/// Default overlap between adjacent tiles in pixels
pub const DEFAULT_OVERLAP: u32 = 0;

// Naming protocol
/// Marker separating the source stem from the encoded origin
pub const TILE_NAME_MARKER: &str = "_tile_";

/// Suffix added to reassembled output file stems
pub const REASSEMBLED_SUFFIX: &str = "_reassembled";

/// Extension used for tiles and reassembled images
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";

/// Input extensions recognized as raster images (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

// Only grayscale and RGB grids are supported
/// Channel count of a single-band image
pub const GRAY_CHANNELS: usize = 1;
/// Channel count of a three-band image
pub const RGB_CHANNELS: usize = 3;

/// Largest canvas a reassembly may allocate, in pixels per channel
///
/// Origins come from file names, so a stray name must not size the canvas
/// without bound.
pub const MAX_CANVAS_PIXELS: usize = 1 << 30;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Logging
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Log filter used with `--quiet`
pub const QUIET_LOG_FILTER: &str = "warn";
/// Log filter used with `--verbose`
pub const VERBOSE_LOG_FILTER: &str = "debug";

/// Whether `extension` names a supported raster format
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(extension))
}
