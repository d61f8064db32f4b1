//! Directory-level orchestration of split, transform and reassembly
//!
//! Images are independent, so each stage fans out across images (and, when
//! splitting, across tiles) on a rayon pool. Every reassembly worker owns its
//! canvas. A failing item is logged and counted without stopping its siblings;
//! only an unreadable root directory aborts a stage.

use crate::batch::summary::{BatchSummary, ItemOutcome, StageSummary};
use crate::batch::transform::{TileTransform, apply_checked};
use crate::io::configuration::{
    DEFAULT_OUTPUT_EXTENSION, REASSEMBLED_SUFFIX, is_supported_extension,
};
use crate::io::error::{Result, TilingError, file_system_error, invalid_parameter};
use crate::io::image::{load_grid, save_grid};
use crate::io::progress::ProgressManager;
use crate::tiling::grid::TilingConfig;
use crate::tiling::naming::tile_file_name;
use crate::tiling::partition::split_file;
use crate::tiling::reassembly::{TileEntry, collect_tiles, reassemble};
use crate::tiling::tile::{Tile, TileOrigin};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stage name for splitting
pub const SPLIT_STAGE: &str = "split";
/// Stage name for the per-tile transform
pub const TRANSFORM_STAGE: &str = "transform";
/// Stage name for reassembly
pub const REASSEMBLE_STAGE: &str = "reassemble";

/// Behavior switches for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Extension (and therefore format) of written tiles and images
    pub extension: String,
    /// Worker count; `None` uses the global rayon pool
    pub jobs: Option<usize>,
    /// Leave items alone whose output already exists
    pub skip_existing: bool,
    /// Draw progress bars
    pub show_progress: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            jobs: None,
            skip_existing: true,
            show_progress: false,
        }
    }
}

/// Runs tiling stages over directory trees
///
/// Layout: `<tiles_root>/<image stem>/<stem>_tile_x<X>_y<Y>.<ext>` for tiles
/// and `<output_dir>/<image stem>_reassembled.<ext>` for rebuilt images.
pub struct BatchDriver {
    config: TilingConfig,
    options: DriverOptions,
    progress: Option<ProgressManager>,
}

impl BatchDriver {
    /// Create a driver for the given tiling configuration
    pub fn new(config: TilingConfig, options: DriverOptions) -> Self {
        let progress = options.show_progress.then(ProgressManager::new);
        Self {
            config,
            options,
            progress,
        }
    }

    /// Tiling configuration used by every stage
    pub const fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Split every supported image in `input_dir` into `tiles_root`
    ///
    /// # Errors
    ///
    /// Returns an error if `input_dir` cannot be listed, `tiles_root` cannot be
    /// created, or the worker pool cannot be built. Per-image failures,
    /// including images whose stem is already taken, are counted in the
    /// summary instead.
    pub fn split_all(&mut self, input_dir: &Path, tiles_root: &Path) -> Result<StageSummary> {
        let (images, clashes) = partition_by_stem(list_images(input_dir)?);
        log::info!(
            "Found {} image(s) to split in '{}'",
            images.len() + clashes.len(),
            input_dir.display()
        );
        create_dir(tiles_root)?;
        self.start_stage(SPLIT_STAGE, images.len());

        let mut outcomes = self.in_pool(|| {
            images
                .par_iter()
                .map(|image| {
                    let outcome = self.split_image(image, tiles_root);
                    self.advance(image);
                    (image.clone(), outcome)
                })
                .collect::<Vec<_>>()
        })?;
        outcomes.extend(clashes.into_iter().map(|(path, e)| (path, Err(e))));

        Ok(self.finish_stage(SPLIT_STAGE, outcomes))
    }

    /// Split one image into `<tiles_root>/<stem>/`
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or split, or a tile
    /// cannot be written
    pub fn split_image(&self, image: &Path, tiles_root: &Path) -> Result<ItemOutcome> {
        let stem = file_stem(image);
        let tile_dir = tiles_root.join(&stem);

        if self.options.skip_existing && has_tiles(&tile_dir) {
            return Ok(ItemOutcome::Skipped {
                reason: format!("tiles already exist in '{}'", tile_dir.display()),
            });
        }

        let tiles = split_file(image, &self.config)?;
        create_dir(&tile_dir)?;

        tiles
            .par_iter()
            .map(|tile| {
                let name = tile_file_name(&stem, tile.origin, &self.options.extension);
                save_grid(&tile.pixels, &tile_dir.join(name))
            })
            .collect::<Result<Vec<()>>>()?;

        log::debug!("Split '{}' into {} tile(s)", image.display(), tiles.len());
        Ok(ItemOutcome::Completed)
    }

    /// Apply `transform` to every tile under `tiles_root`, mirroring the tree
    /// into `output_root`
    ///
    /// Each tile is an independent item; a failing tile does not affect the
    /// others in its directory. A subdirectory that cannot be listed counts as
    /// one failed item.
    ///
    /// # Errors
    ///
    /// Returns an error if `tiles_root` cannot be listed or the worker pool
    /// cannot be built
    pub fn transform_all(
        &mut self,
        tiles_root: &Path,
        output_root: &Path,
        transform: &dyn TileTransform,
    ) -> Result<StageSummary> {
        let TransformJobs {
            jobs,
            ignored,
            unlisted,
        } = collect_transform_jobs(&list_subdirectories(tiles_root)?, output_root);
        log::info!(
            "Found {} tile(s) to transform in '{}'",
            jobs.len(),
            tiles_root.display()
        );
        self.start_stage(TRANSFORM_STAGE, jobs.len());

        let outcomes = self.in_pool(|| {
            jobs.par_iter()
                .map(|(entry, target)| {
                    let outcome =
                        self.transform_tile(transform, entry.origin, &entry.path, target);
                    self.advance(&entry.path);
                    (entry.path.clone(), outcome)
                })
                .collect::<Vec<_>>()
        })?;
        let outcomes = outcomes
            .into_iter()
            .chain(unlisted.into_iter().map(|(dir, e)| (dir, Err(e))))
            .collect();

        let mut summary = self.finish_stage(TRANSFORM_STAGE, outcomes);
        summary.skipped += ignored;
        Ok(summary)
    }

    fn transform_tile(
        &self,
        transform: &dyn TileTransform,
        origin: TileOrigin,
        source: &Path,
        target: &Path,
    ) -> Result<ItemOutcome> {
        if self.options.skip_existing && target.exists() {
            return Ok(ItemOutcome::Skipped {
                reason: format!("'{}' already exists", target.display()),
            });
        }

        let tile = Tile::new(origin, load_grid(source)?);
        let label = source.display().to_string();
        let output = apply_checked(transform, tile, &label)?;
        save_grid(&output.pixels, target)?;
        Ok(ItemOutcome::Completed)
    }

    /// Rebuild one image per subdirectory of `tiles_root` into `output_dir`
    ///
    /// A root without subdirectories yields an empty summary.
    ///
    /// # Errors
    ///
    /// Returns an error if `tiles_root` cannot be listed, `output_dir` cannot
    /// be created, or the worker pool cannot be built
    pub fn reassemble_all(&mut self, tiles_root: &Path, output_dir: &Path) -> Result<StageSummary> {
        let dirs = list_subdirectories(tiles_root)?;
        log::info!(
            "Found {} image director(ies) to reassemble in '{}'",
            dirs.len(),
            tiles_root.display()
        );
        create_dir(output_dir)?;
        self.start_stage(REASSEMBLE_STAGE, dirs.len());

        let outcomes = self.in_pool(|| {
            dirs.par_iter()
                .map(|dir| {
                    let outcome = self.reassemble_image(dir, output_dir);
                    self.advance(dir);
                    (dir.clone(), outcome)
                })
                .collect::<Vec<_>>()
        })?;

        Ok(self.finish_stage(REASSEMBLE_STAGE, outcomes))
    }

    /// Rebuild the image whose tiles are in `tile_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if no tiles decode, a tile cannot be read, or the
    /// result cannot be written
    pub fn reassemble_image(&self, tile_dir: &Path, output_dir: &Path) -> Result<ItemOutcome> {
        let output = output_dir.join(reassembled_file_name(
            &file_name(tile_dir),
            &self.options.extension,
        ));

        if self.options.skip_existing && output.exists() {
            return Ok(ItemOutcome::Skipped {
                reason: format!("'{}' already exists", output.display()),
            });
        }

        let rebuilt = reassemble(tile_dir, self.config.tile_size())?;
        save_grid(&rebuilt.pixels, &output)?;

        let (height, width, _) = rebuilt.pixels.dim();
        log::debug!(
            "Reassembled '{}' ({width}x{height}) from {} tile(s), {} entr(ies) ignored",
            output.display(),
            rebuilt.tiles_placed,
            rebuilt.entries_skipped
        );
        Ok(ItemOutcome::Completed)
    }

    /// Split, optionally transform, then reassemble
    ///
    /// With a transform, transformed tiles are written under
    /// `transformed_root` and reassembly reads from there.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage cannot start; see the stage methods
    pub fn run(
        &mut self,
        input_dir: &Path,
        tiles_root: &Path,
        output_dir: &Path,
        transform: Option<(&dyn TileTransform, &Path)>,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        summary.push(self.split_all(input_dir, tiles_root)?);

        let reassembly_root = match transform {
            Some((transform, transformed_root)) => {
                summary.push(self.transform_all(tiles_root, transformed_root, transform)?);
                transformed_root
            }
            None => tiles_root,
        };

        summary.push(self.reassemble_all(reassembly_root, output_dir)?);
        Ok(summary)
    }

    /// Clear progress bars once all stages are done
    pub fn finish_progress(&self) {
        if let Some(ref pm) = self.progress {
            pm.finish();
        }
    }

    fn in_pool<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.options.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|e| invalid_parameter("jobs", &jobs, &e))?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }

    fn start_stage(&mut self, stage: &'static str, items: usize) {
        if let Some(ref mut pm) = self.progress {
            pm.start_stage(stage, items);
        }
    }

    fn advance(&self, item: &Path) {
        if let Some(ref pm) = self.progress {
            pm.advance(&item.file_name().unwrap_or_default().to_string_lossy());
        }
    }

    fn finish_stage(
        &self,
        stage: &'static str,
        outcomes: Vec<(PathBuf, Result<ItemOutcome>)>,
    ) -> StageSummary {
        if let Some(ref pm) = self.progress {
            pm.finish_stage();
        }

        let mut summary = StageSummary::new(stage);
        for (path, outcome) in &outcomes {
            summary.record(path, outcome);
        }
        log::info!("{summary}");
        summary
    }
}

/// Tiles to transform, gathered across image directories
struct TransformJobs {
    jobs: Vec<(TileEntry, PathBuf)>,
    ignored: usize,
    unlisted: Vec<(PathBuf, TilingError)>,
}

fn collect_transform_jobs(dirs: &[PathBuf], output_root: &Path) -> TransformJobs {
    let mut gathered = TransformJobs {
        jobs: Vec::new(),
        ignored: 0,
        unlisted: Vec::new(),
    };

    for dir in dirs {
        let listing = match collect_tiles(dir) {
            Ok(listing) => listing,
            Err(e) => {
                gathered.unlisted.push((dir.clone(), e));
                continue;
            }
        };
        gathered.ignored += listing.skipped;
        let target_dir = output_root.join(dir.file_name().unwrap_or_default());
        for entry in listing.entries {
            let target = target_dir.join(entry.path.file_name().unwrap_or_default());
            gathered.jobs.push((entry, target));
        }
    }
    gathered
}

/// Split images into those with a unique stem and those repeating one
///
/// Each stem names one tile directory, so only the first image in path order
/// keeps it; later images with the same stem are returned with
/// [`TilingError::DuplicateStem`].
pub fn partition_by_stem(images: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<(PathBuf, TilingError)>) {
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    let mut unique = Vec::new();
    let mut clashes = Vec::new();

    for image in images {
        let stem = file_stem(&image);
        if let Some(first) = owners.get(&stem) {
            clashes.push((
                image.clone(),
                TilingError::DuplicateStem {
                    path: image,
                    first: first.clone(),
                },
            ));
        } else {
            owners.insert(stem, image.clone());
            unique.push(image);
        }
    }
    (unique, clashes)
}

/// Supported image files directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for path in read_dir_paths(dir)? {
        let supported = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(is_supported_extension);
        if supported && path.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Subdirectories directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = read_dir_paths(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Output file name for the image rebuilt from directory `dir_name`
pub fn reassembled_file_name(dir_name: &str, extension: &str) -> String {
    format!("{dir_name}{REASSEMBLED_SUFFIX}.{extension}")
}

fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| file_system_error(dir, "read directory", e))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| file_system_error(dir, "read directory entry", e))
        })
        .collect()
}

fn has_tiles(dir: &Path) -> bool {
    dir.is_dir() && collect_tiles(dir).is_ok_and(|listing| !listing.entries.is_empty())
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| file_system_error(dir, "create directory", e))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
