//! Reconstruction of full images from directories of named tiles
//!
//! Origins come only from file names. The canvas spans the largest origin plus
//! one tile in each direction and starts zero-filled; tiles are copied on top in
//! a deterministic order so overlapping placements resolve the same way on
//! every run.

use crate::io::configuration::MAX_CANVAS_PIXELS;
use crate::io::error::{Result, TilingError, file_system_error};
use crate::io::image::{load_grid, load_grid_with_channels};
use crate::tiling::grid::validate_tile_size;
use crate::tiling::naming::{parse_tile_name, tile_pattern};
use crate::tiling::tile::{PixelGrid, Tile, TileOrigin};
use ndarray::s;
use std::path::{Path, PathBuf};

/// A tile file whose name decoded to an origin
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TileEntry {
    /// Decoded placement
    pub origin: TileOrigin,
    /// File holding the tile pixels
    pub path: PathBuf,
}

/// Decodable tile files of one directory in placement order
#[derive(Debug, Clone, Default)]
pub struct TileListing {
    /// Entries sorted by `(y, x)` then path
    pub entries: Vec<TileEntry>,
    /// Files whose names carried no origin
    pub skipped: usize,
}

/// Result of reassembling one directory
#[derive(Debug, Clone)]
pub struct Reassembly {
    /// Reconstructed pixels
    pub pixels: PixelGrid,
    /// Tiles copied onto the canvas
    pub tiles_placed: usize,
    /// Directory entries ignored because their names did not decode
    pub entries_skipped: usize,
}

/// Zero-initialized pixel grid that tiles are placed onto
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: PixelGrid,
}

impl Canvas {
    /// Allocate a zero-filled canvas
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidSourceData`] if the canvas would exceed
    /// [`MAX_CANVAS_PIXELS`] pixels per channel or its byte size overflows
    pub fn new(height: usize, width: usize, channels: usize) -> Result<Self> {
        let too_large = || TilingError::InvalidSourceData {
            reason: format!(
                "canvas {width}x{height}x{channels} exceeds the limit of \
                 {MAX_CANVAS_PIXELS} pixels"
            ),
        };

        let area = height.checked_mul(width).ok_or_else(too_large)?;
        area.checked_mul(channels).ok_or_else(too_large)?;
        if area > MAX_CANVAS_PIXELS {
            return Err(too_large());
        }

        Ok(Self {
            pixels: PixelGrid::zeros((height, width, channels)),
        })
    }

    /// Allocate a canvas large enough for tiles at every origin
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidSourceData`] if there are no origins or
    /// the canvas they span is too large
    pub fn for_origins<'a, I>(origins: I, tile_size: u32, channels: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a TileOrigin>,
    {
        let (height, width) =
            canvas_extent(origins, tile_size).ok_or_else(|| TilingError::InvalidSourceData {
                reason: "no tiles to place".to_string(),
            })?;
        Self::new(height, width, channels)
    }

    /// Copy a tile's pixels onto the canvas at its origin
    ///
    /// Existing pixels are overwritten. Parts of the tile beyond the canvas
    /// bounds are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile's channel count differs from the canvas
    pub fn place(&mut self, tile: &Tile) -> Result<()> {
        let (height, width, channels) = self.pixels.dim();
        if tile.channels() != channels {
            return Err(TilingError::InvalidSourceData {
                reason: format!(
                    "tile at {} has {} channel(s), canvas has {channels}",
                    tile.origin,
                    tile.channels()
                ),
            });
        }

        let (row, col) = tile.origin.indices();
        let rows = tile.height().min(height.saturating_sub(row));
        let cols = tile.width().min(width.saturating_sub(col));
        if rows == 0 || cols == 0 {
            return Ok(());
        }

        self.pixels
            .slice_mut(s![row..row + rows, col..col + cols, ..])
            .assign(&tile.pixels.slice(s![..rows, ..cols, ..]));
        Ok(())
    }

    /// Borrow the canvas pixels
    pub const fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// Take the canvas pixels
    pub fn into_pixels(self) -> PixelGrid {
        self.pixels
    }
}

/// Canvas `(height, width)` for a set of origins: `max + tile_size` per axis
///
/// Saturates instead of wrapping; [`Canvas::new`] rejects the result.
pub fn canvas_extent<'a, I>(origins: I, tile_size: u32) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = &'a TileOrigin>,
{
    let size = tile_size as usize;
    origins
        .into_iter()
        .fold(None, |extent, origin| {
            let (row, col) = origin.indices();
            let (max_row, max_col) = extent.unwrap_or((row, col));
            Some((max_row.max(row), max_col.max(col)))
        })
        .map(|(max_row, max_col)| {
            (max_row.saturating_add(size), max_col.saturating_add(size))
        })
}

/// Place in-memory tiles onto a fresh canvas
///
/// Tiles are placed in `(y, x)` order; tiles sharing an origin keep their
/// input order, so the last one given wins.
///
/// # Errors
///
/// Returns an error if:
/// - `tile_size` is zero
/// - `tiles` is empty
/// - The tiles do not share one channel count
/// - The canvas spanned by the origins is too large
pub fn assemble(tiles: &[Tile], tile_size: u32) -> Result<PixelGrid> {
    validate_tile_size(tile_size)?;

    let channels = tiles
        .first()
        .map(Tile::channels)
        .ok_or_else(|| TilingError::InvalidSourceData {
            reason: "no tiles to assemble".to_string(),
        })?;

    let mut canvas = Canvas::for_origins(tiles.iter().map(|t| &t.origin), tile_size, channels)?;

    let mut order: Vec<&Tile> = tiles.iter().collect();
    order.sort_by_key(|tile| tile.origin);
    for tile in order {
        canvas.place(tile)?;
    }

    Ok(canvas.into_pixels())
}

/// List the decodable tile files of `dir` in placement order
///
/// Subdirectories are ignored. Files whose names do not decode are counted
/// and skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or the tile name pattern
/// is unusable
pub fn collect_tiles(dir: &Path) -> Result<TileListing> {
    tile_pattern()?;
    let read_dir =
        std::fs::read_dir(dir).map_err(|e| file_system_error(dir, "read directory", e))?;

    let mut listing = TileListing::default();
    for entry in read_dir {
        let entry = entry.map_err(|e| file_system_error(dir, "read directory entry", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match parse_tile_name(&path) {
            Ok(origin) => listing.entries.push(TileEntry { origin, path }),
            Err(e) if e.is_skip() => {
                log::debug!("Skipping '{}': {e}", path.display());
                listing.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    // Last write wins, so fix the order instead of inheriting the listing order
    listing.entries.sort();
    Ok(listing)
}

/// Rebuild one image from the tiles in `dir`
///
/// Channel depth is taken from the first tile in placement order; later tiles
/// are converted to it on load. A tile that cannot be read aborts this image
/// so a partially filled canvas is never returned.
///
/// # Errors
///
/// Returns an error if:
/// - `tile_size` is zero
/// - The directory cannot be read
/// - No file name decodes to an origin ([`TilingError::EmptyResult`])
/// - The decoded origins span a canvas larger than [`MAX_CANVAS_PIXELS`]
/// - A tile file cannot be read or decoded
pub fn reassemble(dir: &Path, tile_size: u32) -> Result<Reassembly> {
    validate_tile_size(tile_size)?;
    let listing = collect_tiles(dir)?;
    let empty = || TilingError::EmptyResult {
        path: dir.to_path_buf(),
    };

    let mut entries = listing.entries.iter();
    let first = entries.next().ok_or_else(empty)?;
    let first_tile = Tile::new(first.origin, load_grid(&first.path)?);
    let channels = first_tile.channels();

    let mut canvas =
        Canvas::for_origins(listing.entries.iter().map(|e| &e.origin), tile_size, channels)?;
    place_from_file(&mut canvas, &first_tile, &first.path, tile_size)?;

    for entry in entries {
        let pixels = load_grid_with_channels(&entry.path, channels)?;
        place_from_file(&mut canvas, &Tile::new(entry.origin, pixels), &entry.path, tile_size)?;
    }

    Ok(Reassembly {
        pixels: canvas.into_pixels(),
        tiles_placed: listing.entries.len(),
        entries_skipped: listing.skipped,
    })
}

fn place_from_file(canvas: &mut Canvas, tile: &Tile, path: &Path, tile_size: u32) -> Result<()> {
    let expected = tile_size as usize;
    if tile.height() != expected || tile.width() != expected {
        log::warn!(
            "Tile '{}' is {}x{}, expected {expected}x{expected}",
            path.display(),
            tile.width(),
            tile.height()
        );
    }
    log::trace!("Placing '{}' at {}", path.display(), tile.origin);
    canvas.place(tile)
}
