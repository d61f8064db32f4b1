//! Tiling configuration and origin planning
//!
//! Computes where tiles start along each axis without touching pixel data.
//! Candidate starts advance by `tile_size - overlap`; the edge policy decides
//! what happens to a candidate whose box runs past the image boundary.

use crate::io::configuration::{DEFAULT_OVERLAP, DEFAULT_TILE_SIZE};
use crate::io::error::{Result, invalid_parameter};
use crate::tiling::tile::TileOrigin;

/// Strategy for tiles whose box would extend past the image edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Move the start inward so the tile is filled from real pixels
    ///
    /// The shifted tile overlaps its neighbor by the shift amount. Padding is
    /// only used when the image is smaller than one tile.
    #[default]
    ShiftEdge,
    /// Keep the start fixed and zero-fill the shortfall
    PadEdge,
}

/// Validated parameters for one split operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingConfig {
    tile_size: u32,
    overlap: u32,
    edge_policy: EdgePolicy,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            overlap: DEFAULT_OVERLAP,
            edge_policy: EdgePolicy::default(),
        }
    }
}

impl TilingConfig {
    /// Create a configuration, rejecting impossible geometry
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - `overlap` is not strictly less than `tile_size`
    pub fn new(tile_size: u32, overlap: u32, edge_policy: EdgePolicy) -> Result<Self> {
        validate_tile_size(tile_size)?;
        if overlap >= tile_size {
            return Err(invalid_parameter(
                "overlap",
                &overlap,
                &format!("must be less than tile size {tile_size}"),
            ));
        }

        Ok(Self {
            tile_size,
            overlap,
            edge_policy,
        })
    }

    /// Edge length of each tile in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Pixels shared by adjacent candidate boxes
    pub const fn overlap(&self) -> u32 {
        self.overlap
    }

    /// Edge handling strategy
    pub const fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Distance between consecutive candidate starts
    pub const fn step(&self) -> u32 {
        self.tile_size - self.overlap
    }
}

/// Reject a zero tile size
///
/// # Errors
///
/// Returns an error if `tile_size` is zero
pub fn validate_tile_size(tile_size: u32) -> Result<()> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"must be a positive integer",
        ));
    }
    Ok(())
}

/// Tile starts along one axis of length `extent`
///
/// Candidates are `0, step, 2*step, ...` while below `extent - overlap`, with at
/// least one candidate so a tiny image still yields a tile. Under
/// [`EdgePolicy::ShiftEdge`] a candidate whose box is cut short is moved to
/// `max(0, end - tile_size)`. Consecutive equal starts are collapsed.
pub fn axis_starts(extent: u32, config: &TilingConfig) -> Vec<u32> {
    let tile_size = config.tile_size();
    let limit = extent.saturating_sub(config.overlap()).max(1);

    let mut starts: Vec<u32> = (0..limit)
        .step_by(config.step() as usize)
        .map(|start| resolve_start(start, extent, tile_size, config.edge_policy()))
        .collect();

    // Shifted edge starts can repeat the previous start
    starts.dedup();
    starts
}

/// Apply the edge policy to a single candidate start
pub const fn resolve_start(start: u32, extent: u32, tile_size: u32, policy: EdgePolicy) -> u32 {
    let end = clamp_end(start, extent, tile_size);
    match policy {
        EdgePolicy::ShiftEdge if end.saturating_sub(start) < tile_size => {
            end.saturating_sub(tile_size)
        }
        _ => start,
    }
}

/// Exclusive end of the box starting at `start`, clipped to the extent
pub const fn clamp_end(start: u32, extent: u32, tile_size: u32) -> u32 {
    let end = start.saturating_add(tile_size);
    if end < extent { end } else { extent }
}

/// Row-major tile origins for an image of `width x height`
pub fn plan_origins(width: u32, height: u32, config: &TilingConfig) -> Vec<TileOrigin> {
    let xs = axis_starts(width, config);
    let ys = axis_starts(height, config);

    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| TileOrigin::new(x, y)))
        .collect()
}
