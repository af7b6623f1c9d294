//! Tests for cell invariants and grid indexing

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::algorithm::bitset::TileBitset;
    use wavetile::algorithm::compatibility::Direction;
    use wavetile::spatial::{Cell, Grid};

    fn tiles(capacity: usize, ids: &[usize]) -> TileBitset {
        let mut set = TileBitset::new(capacity);
        for &id in ids {
            set.insert(id);
        }
        set
    }

    // Tests a new cell holds every tile and is uncollapsed
    // Verified by starting cells collapsed
    #[test]
    fn test_new_cell() {
        let cell = Cell::new(TileBitset::all(4));
        assert_eq!(cell.entropy(), 4);
        assert!(!cell.is_collapsed());
        assert_eq!(cell.tile(), None);
    }

    // Tests restricting only ever shrinks the candidates
    // Verified by assigning the allowed set instead of intersecting
    #[test]
    fn test_restrict_never_grows() {
        let mut cell = Cell::new(TileBitset::all(5));
        assert!(cell.restrict(&tiles(5, &[0, 2, 4])));
        assert!(!cell.restrict(&TileBitset::all(5)));
        assert_eq!(cell.candidates().iter().collect::<Vec<_>>(), vec![0, 2, 4]);

        assert!(cell.restrict(&tiles(5, &[1, 2])));
        assert_eq!(cell.candidates().iter().collect::<Vec<_>>(), vec![2]);
    }

    // Tests collapse commits a single candidate and freezes the cell
    // Verified by leaving the collapsed flag unset
    #[test]
    fn test_collapse() {
        let mut cell = Cell::new(TileBitset::all(3));
        cell.collapse(2).unwrap();
        assert!(cell.is_collapsed());
        assert_eq!(cell.entropy(), 1);
        assert_eq!(cell.tile(), Some(2));

        assert!(!cell.restrict(&TileBitset::new(3)));
        assert_eq!(cell.tile(), Some(2));
    }

    // Tests collapsing to a tile that is no longer possible is refused
    // Verified by removing the candidate membership check
    #[test]
    fn test_collapse_rejects_non_candidate() {
        let mut cell = Cell::new(tiles(3, &[0, 1]));
        assert!(matches!(
            cell.collapse(2),
            Err(AlgorithmError::InvalidTileId { id: 2, .. })
        ));
        assert!(!cell.is_collapsed());
    }

    // Tests dimensions follow (rows, cols) = (height, width)
    // Verified by swapping width and height in the constructor
    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(5, 3, 2);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.dimensions(), (3, 5));
        assert_eq!(grid.tile_count(), 2);
        assert!(grid.contains(2, 4));
        assert!(!grid.contains(3, 0));
    }

    // Tests out-of-bounds access is an error rather than a panic
    // Verified by indexing the array directly
    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(2, 2, 2);
        assert!(matches!(
            grid.get(2, 0),
            Err(AlgorithmError::OutOfBounds {
                row: 2,
                col: 0,
                dimensions: (2, 2)
            })
        ));
        assert!(grid.get_mut(0, 2).is_err());
    }

    // Tests neighbors respect edges and the row-up Top convention
    // Verified by wrapping around at the grid edges
    #[test]
    fn test_neighbor() {
        let grid = Grid::new(3, 2, 2);
        assert_eq!(grid.neighbor(0, 0, Direction::Top), Some((1, 0)));
        assert_eq!(grid.neighbor(0, 0, Direction::Bottom), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Left), None);
        assert_eq!(grid.neighbor(0, 0, Direction::Right), Some((0, 1)));
        assert_eq!(grid.neighbor(1, 2, Direction::Top), None);
        assert_eq!(grid.neighbor(1, 2, Direction::Right), None);
    }

    // Tests committed tiles are only available once every cell collapsed
    // Verified by skipping the completeness check
    #[test]
    fn test_committed_tiles() {
        let mut grid = Grid::new(2, 1, 3);
        grid.get_mut(0, 0).unwrap().collapse(2).unwrap();
        assert!(matches!(
            grid.committed_tiles(),
            Err(AlgorithmError::Incomplete { uncollapsed: 1 })
        ));
        assert!(!grid.is_fully_collapsed());

        grid.get_mut(0, 1).unwrap().collapse(0).unwrap();
        let tiles = grid.committed_tiles().unwrap();
        assert_eq!(tiles.get([0, 0]), Some(&2));
        assert_eq!(tiles.get([0, 1]), Some(&0));
        assert_eq!(grid.collapsed_count(), 2);
    }
}
