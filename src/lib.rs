//! Fixed-size tiling of raster images and coordinate-driven reassembly
//!
//! Source images are partitioned into square tiles whose top-left origins are
//! encoded in their file names. Tiles can be processed independently and later
//! placed back onto a zero-filled canvas using only those names.

#![deny(unsafe_code)]

/// Batch orchestration across directories of images and tiles
pub mod batch;
/// Input/output operations, configuration and error handling
pub mod io;
/// Grid partitioning, tile naming and reassembly
pub mod tiling;

pub use io::error::{Result, TilingError};
