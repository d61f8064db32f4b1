//! Per-tile transform capability applied between split and reassembly

use crate::io::error::{Result, TilingError};
use crate::tiling::tile::Tile;

/// A side-effect-free operation applied independently to each tile
///
/// Implementations must keep the tile's dimensions and channel count; the
/// batch driver rejects output that changes either.
pub trait TileTransform: Send + Sync {
    /// Produce the transformed tile
    ///
    /// # Errors
    ///
    /// Returns an error if the tile cannot be transformed
    fn apply(&self, tile: Tile) -> Result<Tile>;
}

/// Transform that returns tiles unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl TileTransform for Identity {
    fn apply(&self, tile: Tile) -> Result<Tile> {
        Ok(tile)
    }
}

/// Adapter turning a closure into a [`TileTransform`]
pub struct FnTransform<F> {
    func: F,
}

impl<F> TileTransform for FnTransform<F>
where
    F: Fn(Tile) -> Result<Tile> + Send + Sync,
{
    fn apply(&self, tile: Tile) -> Result<Tile> {
        (self.func)(tile)
    }
}

/// Wrap a closure as a transform
pub const fn from_fn<F>(func: F) -> FnTransform<F>
where
    F: Fn(Tile) -> Result<Tile> + Send + Sync,
{
    FnTransform { func }
}

/// Apply `transform` and check that the tile kept its shape
///
/// # Errors
///
/// Returns [`TilingError::Transform`] if the transform fails or changes the
/// tile's dimensions, channel count or origin
pub fn apply_checked(transform: &dyn TileTransform, tile: Tile, label: &str) -> Result<Tile> {
    let origin = tile.origin;
    let shape = tile.pixels.dim();

    let output = transform.apply(tile).map_err(|e| TilingError::Transform {
        tile: label.to_string(),
        reason: e.to_string(),
    })?;

    if output.pixels.dim() != shape || output.origin != origin {
        let (height, width, channels) = output.pixels.dim();
        let (in_height, in_width, in_channels) = shape;
        return Err(TilingError::Transform {
            tile: label.to_string(),
            reason: format!(
                "output {width}x{height}x{channels} at {} does not match \
                 input {in_width}x{in_height}x{in_channels} at {origin}",
                output.origin
            ),
        });
    }

    Ok(output)
}
