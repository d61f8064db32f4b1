//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use gridtile::TilingError;
    use gridtile::io::error::{computation_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = TilingError::FileSystem {
            path: "/tmp/tiles".into(),
            operation: "read directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read directory"));
        assert!(TilingError::BatchIncomplete { failed: 2 }.source().is_none());
    }

    #[test]
    fn test_invalid_parameter_message() {
        let error = invalid_parameter("overlap", &64, &"must be less than tile size 64");
        let message = error.to_string();
        assert!(message.contains("overlap"));
        assert!(message.contains("64"));
        assert!(message.contains("must be less than"));
    }

    // Tests only undecodable names and empty results count as skips
    #[test]
    fn test_skip_classification() {
        assert!(
            TilingError::TileNameDecode {
                name: "notes.txt".to_string()
            }
            .is_skip()
        );
        assert!(
            TilingError::EmptyResult {
                path: PathBuf::from("tiles/a")
            }
            .is_skip()
        );
        assert!(!computation_error("grid", &"bad shape").is_skip());
        assert!(!TilingError::BatchIncomplete { failed: 1 }.is_skip());
    }

    #[test]
    fn test_transform_and_decode_messages() {
        let error = TilingError::Transform {
            tile: "a_tile_x0_y0.png".to_string(),
            reason: "shape changed".to_string(),
        };
        assert!(error.to_string().contains("a_tile_x0_y0.png"));

        let error = TilingError::TileNameDecode {
            name: "readme.md".to_string(),
        };
        assert!(error.to_string().contains("readme.md"));
    }

    // Tests a stem clash names both images and is a failure, not a skip
    #[test]
    fn test_duplicate_stem_message() {
        let error = TilingError::DuplicateStem {
            path: PathBuf::from("in/scan.tif"),
            first: PathBuf::from("in/scan.png"),
        };
        let message = error.to_string();
        assert!(message.contains("in/scan.tif"));
        assert!(message.contains("in/scan.png"));
        assert!(!error.is_skip());
        assert!(error.source().is_none());
    }
}
