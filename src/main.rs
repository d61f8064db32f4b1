//! CLI entry point for splitting and reassembling tiled images

use clap::Parser;
use gridtile::io::cli::{Cli, CommandRunner};

fn main() -> gridtile::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    let runner = CommandRunner::new(cli);
    let summary = runner.run()?;
    summary.log_report();

    if summary.is_clean() {
        Ok(())
    } else {
        Err(gridtile::TilingError::BatchIncomplete {
            failed: summary.failed(),
        })
    }
}
