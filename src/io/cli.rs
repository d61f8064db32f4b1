//! Command-line interface for batch splitting and reassembly

use crate::batch::driver::{BatchDriver, DriverOptions};
use crate::batch::summary::BatchSummary;
use crate::io::configuration::{
    DEFAULT_LOG_FILTER, DEFAULT_OUTPUT_EXTENSION, DEFAULT_OVERLAP, DEFAULT_TILE_SIZE,
    QUIET_LOG_FILTER, VERBOSE_LOG_FILTER, is_supported_extension,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::LogWriter;
use crate::tiling::grid::{EdgePolicy, TilingConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridtile")]
#[command(
    author,
    version,
    about = "Split images into fixed-size tiles and reassemble them"
)]
/// Command-line arguments for the tiling tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log per-image and per-tile detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Process items even if their output exists
    #[arg(short, long, global = true)]
    pub no_skip: bool,

    /// Worker threads (defaults to one per core)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// Extension, and therefore format, of written tiles and images
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_EXTENSION)]
    pub extension: String,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Split every image in INPUT into one tile directory per image under TILES
    Split {
        /// Directory of source images
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Root directory for tile subdirectories
        #[arg(value_name = "TILES")]
        tiles: PathBuf,
        /// Tiling geometry
        #[command(flatten)]
        tiling: TilingArgs,
    },
    /// Rebuild one image per subdirectory of TILES into OUTPUT
    Reassemble {
        /// Root directory holding one tile subdirectory per image
        #[arg(value_name = "TILES")]
        tiles: PathBuf,
        /// Directory for reassembled images
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Edge length of the tiles in pixels
        #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
        tile_size: u32,
    },
    /// Split INPUT into TILES, then reassemble TILES into OUTPUT
    Run {
        /// Directory of source images
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Root directory for tile subdirectories
        #[arg(value_name = "TILES")]
        tiles: PathBuf,
        /// Directory for reassembled images
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Tiling geometry
        #[command(flatten)]
        tiling: TilingArgs,
    },
}

/// Tiling geometry shared by splitting subcommands
#[derive(Args, Debug, Clone)]
pub struct TilingArgs {
    /// Edge length of each square tile in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Pixels shared by adjacent tiles (must be less than the tile size)
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP)]
    pub overlap: u32,

    /// Handling of tiles that run past the image edge
    #[arg(long, value_enum, default_value_t = EdgePolicyArg::Shift)]
    pub edge_policy: EdgePolicyArg,
}

impl TilingArgs {
    /// Validate into a tiling configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is zero or the overlap is not less
    /// than the tile size
    pub fn to_config(&self) -> Result<TilingConfig> {
        TilingConfig::new(self.tile_size, self.overlap, self.edge_policy.into())
    }
}

/// Edge policy names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicyArg {
    /// Shift edge tiles inward so they hold only real pixels
    Shift,
    /// Zero-pad edge tiles at their original position
    Pad,
}

impl From<EdgePolicyArg> for EdgePolicy {
    fn from(arg: EdgePolicyArg) -> Self {
        match arg {
            EdgePolicyArg::Shift => Self::ShiftEdge,
            EdgePolicyArg::Pad => Self::PadEdge,
        }
    }
}

impl Cli {
    /// Check if existing output should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter implied by `--quiet` and `--verbose`
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else if self.quiet {
            QUIET_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }

    /// Install the global logger; `RUST_LOG` overrides the flag-derived filter
    ///
    /// Records go through [`LogWriter`] so they interleave cleanly with
    /// progress bars.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_filter());
        // A logger installed earlier (e.g. by a test harness) stays in place
        let _ = env_logger::Builder::from_env(env)
            .target(env_logger::Target::Pipe(Box::new(LogWriter)))
            .try_init();
    }

    /// Driver options derived from the global flags
    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            extension: self.extension.clone(),
            jobs: self.jobs,
            skip_existing: self.skip_existing(),
            show_progress: self.should_show_progress(),
        }
    }
}

/// Executes the parsed subcommand through a [`BatchDriver`]
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the subcommand and return its outcome counts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tiling parameters or output extension are invalid
    /// - A root directory cannot be read or created
    pub fn run(&self) -> Result<BatchSummary> {
        let extension = &self.cli.extension;
        if !is_supported_extension(extension) {
            return Err(invalid_parameter(
                "extension",
                extension,
                &"not a supported image format",
            ));
        }
        let options = self.cli.driver_options();

        let summary = match &self.cli.command {
            Command::Split {
                input,
                tiles,
                tiling,
            } => {
                let mut driver = BatchDriver::new(tiling.to_config()?, options);
                let stage = driver.split_all(input, tiles)?;
                driver.finish_progress();
                BatchSummary::from(stage)
            }
            Command::Reassemble {
                tiles,
                output,
                tile_size,
            } => {
                let config = TilingConfig::new(*tile_size, 0, EdgePolicy::default())?;
                let mut driver = BatchDriver::new(config, options);
                let stage = driver.reassemble_all(tiles, output)?;
                driver.finish_progress();
                BatchSummary::from(stage)
            }
            Command::Run {
                input,
                tiles,
                output,
                tiling,
            } => {
                let mut driver = BatchDriver::new(tiling.to_config()?, options);
                let summary = driver.run(input, tiles, output, None)?;
                driver.finish_progress();
                summary
            }
        };

        Ok(summary)
    }
}
