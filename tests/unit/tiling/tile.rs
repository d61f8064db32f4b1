//! Tests for tile and origin types

#[cfg(test)]
mod tests {
    use gridtile::tiling::tile::{PixelGrid, Tile, TileOrigin};

    // Tests origins order row-major: by y first, then x
    #[test]
    fn test_origin_ordering() {
        let mut origins = vec![
            TileOrigin::new(5, 1),
            TileOrigin::new(9, 0),
            TileOrigin::new(0, 1),
            TileOrigin::new(0, 0),
        ];
        origins.sort();

        assert_eq!(
            origins,
            vec![
                TileOrigin::new(0, 0),
                TileOrigin::new(9, 0),
                TileOrigin::new(0, 1),
                TileOrigin::new(5, 1),
            ]
        );
    }

    #[test]
    fn test_origin_indices_and_display() {
        let origin = TileOrigin::new(476, 12);
        assert_eq!(origin.indices(), (12, 476));
        assert_eq!(origin.to_string(), "(476, 12)");
    }

    #[test]
    fn test_tile_dimensions() {
        let tile = Tile::new(TileOrigin::new(0, 0), PixelGrid::zeros((8, 6, 3)));
        assert_eq!(tile.height(), 8);
        assert_eq!(tile.width(), 6);
        assert_eq!(tile.channels(), 3);
    }
}
