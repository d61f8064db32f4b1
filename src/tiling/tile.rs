//! Tile and origin types shared by the partitioner and the reassembler

use ndarray::Array3;
use std::fmt;

/// Owned 8-bit pixel data shaped `(height, width, channels)`
pub type PixelGrid = Array3<u8>;

/// Top-left coordinate of a tile in source-image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileOrigin {
    /// Row of the top-left pixel
    ///
    /// Declared before `x` so the derived ordering is row-major.
    pub y: u32,
    /// Column of the top-left pixel
    pub x: u32,
}

impl TileOrigin {
    /// Create an origin from column and row
    pub const fn new(x: u32, y: u32) -> Self {
        Self { y, x }
    }

    /// Origin as `(row, col)` array indices
    pub const fn indices(self) -> (usize, usize) {
        (self.y as usize, self.x as usize)
    }
}

impl fmt::Display for TileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square block of pixels tagged with the origin it was extracted from
///
/// Tiles are never mutated after creation; a transform consumes a tile and
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Source-space origin of the top-left pixel
    pub origin: TileOrigin,
    /// Pixel block shaped `(tile_size, tile_size, channels)`
    pub pixels: PixelGrid,
}

impl Tile {
    /// Wrap pixel data with its origin
    pub const fn new(origin: TileOrigin, pixels: PixelGrid) -> Self {
        Self { origin, pixels }
    }

    /// Pixel rows
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Pixel columns
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Channels per pixel (1 or 3)
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }
}
