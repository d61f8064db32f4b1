//! Grid partitioning of a source image into fixed-size tiles
//!
//! Every emitted tile is exactly `tile_size x tile_size`. Edge tiles are either
//! shifted inward or zero-padded depending on the configured [`EdgePolicy`].
//!
//! [`EdgePolicy`]: crate::tiling::grid::EdgePolicy

use crate::io::configuration::{GRAY_CHANNELS, RGB_CHANNELS};
use crate::io::error::{Result, TilingError};
use crate::io::image::load_grid;
use crate::tiling::grid::{TilingConfig, clamp_end, plan_origins};
use crate::tiling::tile::{PixelGrid, Tile, TileOrigin};
use ndarray::{ArrayView3, s};
use rayon::prelude::*;
use std::path::Path;

/// Split an image into tiles in row-major origin order
///
/// Extraction runs in parallel across tile positions; the returned order is
/// the plan order regardless of scheduling.
///
/// # Errors
///
/// Returns an error if:
/// - The image has zero width or height
/// - The image channel count is neither 1 nor 3
/// - The image dimensions do not fit in `u32`
pub fn split(image: &PixelGrid, config: &TilingConfig) -> Result<Vec<Tile>> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 {
        return Err(TilingError::InvalidSourceData {
            reason: format!("image has empty dimensions {width}x{height}"),
        });
    }
    if channels != GRAY_CHANNELS && channels != RGB_CHANNELS {
        return Err(TilingError::InvalidSourceData {
            reason: format!("unsupported channel count {channels}, expected 1 or 3"),
        });
    }

    let width = dimension_to_u32("width", width)?;
    let height = dimension_to_u32("height", height)?;
    let origins = plan_origins(width, height, config);
    let view = image.view();

    let tiles = origins
        .par_iter()
        .map(|&origin| extract_tile(&view, origin, config.tile_size()))
        .collect();
    Ok(tiles)
}

/// Read an image file and split it
///
/// # Errors
///
/// Returns an error if the file cannot be read or the image cannot be split
pub fn split_file(path: &Path, config: &TilingConfig) -> Result<Vec<Tile>> {
    let image = load_grid(path)?;
    split(&image, config)
}

/// Copy the box at `origin` into a new tile, zero-padding any shortfall
///
/// The copied region is clipped to the image; anything beyond it stays zero
/// and is anchored at the tile's own top-left corner.
pub fn extract_tile(image: &ArrayView3<'_, u8>, origin: TileOrigin, tile_size: u32) -> Tile {
    let (height, width, channels) = image.dim();
    let (row, col) = origin.indices();
    let size = tile_size as usize;

    let row_end = clamp_end(origin.y, height as u32, tile_size) as usize;
    let col_end = clamp_end(origin.x, width as u32, tile_size) as usize;
    let rows = row_end.saturating_sub(row);
    let cols = col_end.saturating_sub(col);

    let mut pixels = PixelGrid::zeros((size, size, channels));
    if rows > 0 && cols > 0 {
        pixels
            .slice_mut(s![..rows, ..cols, ..])
            .assign(&image.slice(s![row..row_end, col..col_end, ..]));
    }

    Tile::new(origin, pixels)
}

fn dimension_to_u32(name: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|e| TilingError::InvalidSourceData {
        reason: format!("image {name} {value} exceeds the supported range: {e}"),
    })
}
