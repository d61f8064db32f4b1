//! Bidirectional mapping between tile origins and file names
//!
//! The origin is the only placement information that survives between split
//! and reassembly, so names are written as `<stem>_tile_x<X>_y<Y>.<ext>` and
//! read back by pattern matching.

use crate::io::configuration::TILE_NAME_MARKER;
use crate::io::error::{Result, TilingError, computation_error};
use crate::tiling::tile::TileOrigin;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// ASCII digits only; `\d` would also accept other Unicode digits
static TILE_PATTERN: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"tile_x([0-9]+)_y([0-9]+)"));

/// Compiled tile name pattern
///
/// # Errors
///
/// Returns an error if the pattern failed to compile
pub fn tile_pattern() -> Result<&'static Regex> {
    TILE_PATTERN
        .as_ref()
        .map_err(|e| computation_error("tile name pattern", e))
}

/// Encode an origin into a file stem
pub fn encode(base_name: &str, origin: TileOrigin) -> String {
    format!("{base_name}{TILE_NAME_MARKER}x{}_y{}", origin.x, origin.y)
}

/// Full tile file name including extension
pub fn tile_file_name(base_name: &str, origin: TileOrigin, extension: &str) -> String {
    format!("{}.{extension}", encode(base_name, origin))
}

/// Recover an origin from an arbitrary file name
///
/// Returns `None` when the name carries no origin or a coordinate does not fit
/// in `u32`. The last occurrence wins, so a stem that itself contains the
/// pattern still decodes to the origin that was appended to it.
pub fn decode(name: &str) -> Option<TileOrigin> {
    let pattern = tile_pattern().ok()?;
    let captures = pattern.captures_iter(name).last()?;

    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = captures.get(2)?.as_str().parse().ok()?;
    Some(TileOrigin::new(x, y))
}

/// Decode the file name component of `path`
///
/// # Errors
///
/// Returns [`TilingError::TileNameDecode`] if the name carries no origin, or
/// an error if the pattern itself is unusable
pub fn parse_tile_name(path: &Path) -> Result<TileOrigin> {
    tile_pattern()?;
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    decode(&name).ok_or(TilingError::TileNameDecode { name })
}
