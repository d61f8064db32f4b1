//! Tests for command-line parsing and subcommand dispatch

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gridtile::TilingError;
    use gridtile::io::cli::{Cli, Command, CommandRunner, EdgePolicyArg};
    use gridtile::io::configuration::{
        DEFAULT_LOG_FILTER, DEFAULT_OVERLAP, DEFAULT_TILE_SIZE, QUIET_LOG_FILTER,
        VERBOSE_LOG_FILTER,
    };
    use gridtile::io::image::save_grid;
    use gridtile::tiling::grid::EdgePolicy;
    use gridtile::tiling::tile::PixelGrid;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Tests split parsing with only the required directories
    #[test]
    fn test_parse_split_defaults() {
        let cli = Cli::parse_from(["gridtile", "split", "in", "tiles"]);

        match &cli.command {
            Command::Split {
                input,
                tiles,
                tiling,
            } => {
                assert_eq!(input, &PathBuf::from("in"));
                assert_eq!(tiles, &PathBuf::from("tiles"));
                assert_eq!(tiling.tile_size, DEFAULT_TILE_SIZE);
                assert_eq!(tiling.overlap, DEFAULT_OVERLAP);
                assert_eq!(tiling.edge_policy, EdgePolicyArg::Shift);
            }
            _ => unreachable!("Expected split subcommand"),
        }
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert_eq!(cli.extension, "png");
        assert_eq!(cli.jobs, None);
    }

    #[test]
    fn test_parse_run_all_args() {
        let cli = Cli::parse_from([
            "gridtile",
            "run",
            "in",
            "tiles",
            "out",
            "--tile-size",
            "256",
            "--overlap",
            "16",
            "--edge-policy",
            "pad",
            "--jobs",
            "2",
            "--no-skip",
            "--quiet",
            "-e",
            "tif",
        ]);

        match &cli.command {
            Command::Run { output, tiling, .. } => {
                assert_eq!(output, &PathBuf::from("out"));
                let config = tiling.to_config().unwrap();
                assert_eq!(config.tile_size(), 256);
                assert_eq!(config.overlap(), 16);
                assert_eq!(config.edge_policy(), EdgePolicy::PadEdge);
            }
            _ => unreachable!("Expected run subcommand"),
        }

        let options = cli.driver_options();
        assert_eq!(options.jobs, Some(2));
        assert!(!options.skip_existing);
        assert!(!options.show_progress);
        assert_eq!(options.extension, "tif");
    }

    #[test]
    fn test_parse_reassemble() {
        let cli = Cli::parse_from(["gridtile", "reassemble", "tiles", "out", "-t", "512"]);
        match cli.command {
            Command::Reassemble { tile_size, .. } => assert_eq!(tile_size, 512),
            _ => unreachable!("Expected reassemble subcommand"),
        }
    }

    // Tests quiet and verbose are mutually exclusive
    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["gridtile", "-q", "-v", "split", "in", "tiles"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_filter_follows_flags() {
        let cli = Cli::parse_from(["gridtile", "split", "in", "tiles"]);
        assert_eq!(cli.log_filter(), DEFAULT_LOG_FILTER);

        let cli = Cli::parse_from(["gridtile", "--quiet", "split", "in", "tiles"]);
        assert_eq!(cli.log_filter(), QUIET_LOG_FILTER);

        let cli = Cli::parse_from(["gridtile", "split", "in", "tiles", "--verbose"]);
        assert_eq!(cli.log_filter(), VERBOSE_LOG_FILTER);
    }

    #[test]
    fn test_edge_policy_arg_conversion() {
        assert_eq!(EdgePolicy::from(EdgePolicyArg::Shift), EdgePolicy::ShiftEdge);
        assert_eq!(EdgePolicy::from(EdgePolicyArg::Pad), EdgePolicy::PadEdge);
    }

    // Tests invalid geometry is rejected before any directory is touched
    #[test]
    fn test_runner_rejects_invalid_overlap() {
        let temp_dir = TempDir::new().unwrap();
        let tiles = temp_dir.path().join("tiles");
        let cli = Cli::parse_from([
            "gridtile",
            "-q",
            "split",
            temp_dir.path().to_str().unwrap(),
            tiles.to_str().unwrap(),
            "-t",
            "8",
            "-o",
            "8",
        ]);

        let result = CommandRunner::new(cli).run();
        assert!(matches!(result, Err(TilingError::InvalidParameter { .. })));
        assert!(!tiles.exists());
    }

    #[test]
    fn test_runner_rejects_unknown_extension() {
        let cli = Cli::parse_from(["gridtile", "-q", "-e", "webp", "split", "in", "tiles"]);
        match CommandRunner::new(cli).run() {
            Err(TilingError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "extension");
            }
            other => unreachable!("Expected InvalidParameter, got {other:?}"),
        }
    }

    // Tests the split and reassemble subcommands chain through the file system
    #[test]
    fn test_runner_split_then_reassemble() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let tiles = temp_dir.path().join("tiles");
        let output = temp_dir.path().join("out");
        let image = PixelGrid::from_shape_fn((10, 13, 3), |(r, c, ch)| (r * 20 + c + ch) as u8);
        save_grid(&image, &input.join("pic.png")).unwrap();

        let split = Cli::parse_from([
            "gridtile",
            "-q",
            "split",
            input.to_str().unwrap(),
            tiles.to_str().unwrap(),
            "-t",
            "8",
        ]);
        let summary = CommandRunner::new(split).run().unwrap();
        assert_eq!(summary.succeeded(), 1);
        assert!(tiles.join("pic").join("pic_tile_x5_y2.png").is_file());

        let reassemble = Cli::parse_from([
            "gridtile",
            "-q",
            "reassemble",
            tiles.to_str().unwrap(),
            output.to_str().unwrap(),
            "-t",
            "8",
        ]);
        let summary = CommandRunner::new(reassemble).run().unwrap();
        assert!(summary.is_clean());
        assert!(output.join("pic_reassembled.png").is_file());
    }
}
