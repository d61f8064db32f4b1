//! Batch stages over directories of images and tiles

/// Directory-level split, transform and reassembly stages
pub mod driver;
/// Per-stage outcome accounting
pub mod summary;
/// Per-tile transform capability
pub mod transform;

pub use driver::{BatchDriver, DriverOptions};
pub use summary::{BatchSummary, ItemOutcome, StageSummary};
pub use transform::{Identity, TileTransform};
