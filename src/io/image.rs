//! Conversion between encoded image files and 8-bit pixel grids
//!
//! Grids are always single-band or three-band. Alpha is dropped and 16-bit
//! samples are reduced to 8 bits on load.

use crate::io::configuration::{GRAY_CHANNELS, RGB_CHANNELS};
use crate::io::error::{Result, TilingError, computation_error, file_system_error};
use crate::tiling::tile::PixelGrid;
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Channel count a decoded image maps to
pub fn natural_channels(img: &DynamicImage) -> usize {
    if img.color().has_color() {
        RGB_CHANNELS
    } else {
        GRAY_CHANNELS
    }
}

/// Convert a decoded image into a grid with `channels` bands
///
/// # Errors
///
/// Returns an error if `channels` is neither 1 nor 3
pub fn grid_from_image(img: &DynamicImage, channels: usize) -> Result<PixelGrid> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let raw = match channels {
        GRAY_CHANNELS => img.to_luma8().into_raw(),
        RGB_CHANNELS => img.to_rgb8().into_raw(),
        other => return Err(unsupported_channels(other)),
    };

    PixelGrid::from_shape_vec((height, width, channels), raw)
        .map_err(|e| computation_error("grid from image", &e))
}

/// Convert a grid back into an encodable image
///
/// # Errors
///
/// Returns an error if the grid has an unsupported channel count or
/// dimensions that do not fit an image
pub fn image_from_grid(grid: &PixelGrid) -> Result<DynamicImage> {
    let (height, width, channels) = grid.dim();
    let width = u32::try_from(width).map_err(|e| computation_error("image from grid", &e))?;
    let height = u32::try_from(height).map_err(|e| computation_error("image from grid", &e))?;

    // Logical iteration order is row-major regardless of memory layout
    let raw: Vec<u8> = grid.iter().copied().collect();

    let img = match channels {
        GRAY_CHANNELS => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        RGB_CHANNELS => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        other => return Err(unsupported_channels(other)),
    };

    img.ok_or_else(|| computation_error("image from grid", &"buffer size mismatch"))
}

/// Load an image file at its natural channel depth
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img = open_image(path)?;
    grid_from_image(&img, natural_channels(&img))
}

/// Load an image file converted to `channels` bands
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if `channels`
/// is neither 1 nor 3
pub fn load_grid_with_channels(path: &Path, channels: usize) -> Result<PixelGrid> {
    let img = open_image(path)?;
    grid_from_image(&img, channels)
}

/// Encode a grid to `path`, creating parent directories as needed
///
/// The format follows the path's extension.
///
/// # Errors
///
/// Returns an error if:
/// - The grid cannot be converted to an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
    let img = image_from_grid(grid)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(path).map_err(|e| TilingError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| TilingError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

fn unsupported_channels(channels: usize) -> TilingError {
    TilingError::InvalidSourceData {
        reason: format!("unsupported channel count {channels}, expected 1 or 3"),
    }
}
