//! Tests for conversion between image files and pixel grids

#[cfg(test)]
mod tests {
    use gridtile::TilingError;
    use gridtile::io::image::{
        grid_from_image, image_from_grid, load_grid, load_grid_with_channels, natural_channels,
        save_grid,
    };
    use gridtile::tiling::tile::PixelGrid;
    use image::{DynamicImage, GrayAlphaImage, Rgb, RgbImage, RgbaImage};
    use tempfile::TempDir;

    // Tests alpha is dropped and color decides the channel count
    #[test]
    fn test_natural_channels() {
        assert_eq!(natural_channels(&DynamicImage::new_rgb8(2, 2)), 3);
        assert_eq!(natural_channels(&DynamicImage::ImageRgba8(RgbaImage::new(2, 2))), 3);
        assert_eq!(natural_channels(&DynamicImage::new_luma8(2, 2)), 1);
        assert_eq!(
            natural_channels(&DynamicImage::ImageLumaA8(GrayAlphaImage::new(2, 2))),
            1
        );
    }

    // Tests grid rows map to image rows and columns to image columns
    #[test]
    fn test_grid_orientation() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        let grid = grid_from_image(&DynamicImage::ImageRgb8(img), 3).unwrap();

        assert_eq!(grid.dim(), (2, 3, 3));
        assert_eq!(grid.get([1, 2, 0]), Some(&10));
        assert_eq!(grid.get([1, 2, 2]), Some(&30));
        assert_eq!(grid.get([0, 0, 0]), Some(&0));
    }

    #[test]
    fn test_image_from_grid_round_trip() {
        let grid = PixelGrid::from_shape_fn((4, 5, 1), |(r, c, _)| (r * 5 + c) as u8);
        let img = image_from_grid(&grid).unwrap();

        assert_eq!((img.width(), img.height()), (5, 4));
        assert_eq!(grid_from_image(&img, 1).unwrap(), grid);
    }

    #[test]
    fn test_unsupported_channel_counts() {
        let grid = PixelGrid::zeros((2, 2, 4));
        assert!(matches!(
            image_from_grid(&grid),
            Err(TilingError::InvalidSourceData { .. })
        ));
        assert!(matches!(
            grid_from_image(&DynamicImage::new_rgb8(2, 2), 2),
            Err(TilingError::InvalidSourceData { .. })
        ));
    }

    // Tests saving creates missing parents and loading restores exact pixels
    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/grid.png");
        let grid = PixelGrid::from_shape_fn((6, 7, 3), |(r, c, ch)| (r * 31 + c * 7 + ch) as u8);

        save_grid(&grid, &path).unwrap();
        assert!(path.is_file());
        assert_eq!(load_grid(&path).unwrap(), grid);

        let gray = load_grid_with_channels(&path, 1).unwrap();
        assert_eq!(gray.dim(), (6, 7, 1));
    }

    #[test]
    fn test_load_missing_or_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let corrupt = temp_dir.path().join("corrupt.png");
        std::fs::write(&corrupt, "not an image").unwrap();

        match load_grid(&corrupt) {
            Err(TilingError::ImageLoad { path, .. }) => assert_eq!(path, corrupt),
            other => unreachable!("Expected ImageLoad, got {other:?}"),
        }
        assert!(load_grid(&temp_dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_save_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grid.unknown");

        let result = save_grid(&PixelGrid::zeros((2, 2, 1)), &path);
        assert!(matches!(result, Err(TilingError::ImageExport { .. })));
    }
}
