//! Geometric core: tile origins, partitioning and reassembly
//!
//! This module contains:
//! - Origin planning under the shift-edge and pad-edge policies
//! - Tile extraction from a source grid
//! - The file name protocol carrying origins between stages
//! - Canvas reconstruction from decoded tiles

/// Tiling configuration, edge policies and origin planning
pub mod grid;
/// Tile file name encoding and decoding
pub mod naming;
/// Splitting images into tiles
pub mod partition;
/// Rebuilding images from tiles
pub mod reassembly;
/// Tile, origin and pixel grid types
pub mod tile;

pub use grid::{EdgePolicy, TilingConfig};
pub use tile::{PixelGrid, Tile, TileOrigin};
