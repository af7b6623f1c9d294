//! Tests for the adjacency relation built from edge labels and by hand

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::algorithm::compatibility::{CompatibilityTable, Direction, EdgeLabels};

    fn labels(top: &str, right: &str, bottom: &str, left: &str) -> EdgeLabels {
        EdgeLabels::new(top.into(), right.into(), bottom.into(), left.into())
    }

    // Tests opposite directions pair up and offsets point the right way
    // Verified by swapping Top and Bottom offsets
    #[test]
    fn test_direction_opposite_and_offset() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dr, dc) = direction.offset();
            let (or, oc) = direction.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
        assert_eq!(Direction::Top.offset(), (1, 0));
        assert_eq!(Direction::Right.offset(), (0, 1));
    }

    // Tests allowed sets pair each edge with the neighbor's opposite edge
    // Verified by comparing against the same edge instead of the opposite one
    #[test]
    fn test_from_labels_matches_opposite_edges() {
        // Tile 0 has "a" on the right; tile 1 has "a" on the left
        let table = CompatibilityTable::from_labels(&[
            labels("x", "a", "y", "b"),
            labels("y", "c", "x", "a"),
        ])
        .unwrap();

        assert_eq!(table.tile_count(), 2);
        assert_eq!(table.allowed(0, Direction::Right).unwrap().iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(table.allowed(1, Direction::Left).unwrap().iter().collect::<Vec<_>>(), vec![0]);
        // Top of 0 is "x", bottom of 1 is "x"
        assert_eq!(table.allowed(0, Direction::Top).unwrap().iter().collect::<Vec<_>>(), vec![1]);
        // Bottom of 0 is "y", top of 1 is "y"
        assert_eq!(table.allowed(0, Direction::Bottom).unwrap().iter().collect::<Vec<_>>(), vec![1]);
        assert!(table.allowed(1, Direction::Right).unwrap().is_empty());
    }

    // Tests a tile can be compatible with itself
    // Verified by skipping the tile's own index when matching
    #[test]
    fn test_self_compatibility() {
        let table = CompatibilityTable::from_labels(&[labels("g", "g", "g", "g")]).unwrap();
        for direction in Direction::ALL {
            assert_eq!(table.allowed(0, direction).unwrap().iter().collect::<Vec<_>>(), vec![0]);
            assert_eq!(table.support(0, direction).unwrap().iter().collect::<Vec<_>>(), vec![0]);
        }
    }

    // Tests an empty label list is rejected as invalid rule data
    // Verified by removing the empty check
    #[test]
    fn test_from_labels_empty() {
        let result = CompatibilityTable::from_labels::<String>(&[]);
        assert!(matches!(result, Err(AlgorithmError::InvalidRuleData { .. })));
    }

    // Tests out-of-range ids fail with InvalidTileId
    // Verified by returning an empty set for unknown tiles
    #[test]
    fn test_invalid_tile_id() {
        let mut table = CompatibilityTable::new(2);
        assert!(matches!(
            table.allowed(2, Direction::Top),
            Err(AlgorithmError::InvalidTileId { id: 2, tile_count: 2 })
        ));
        assert!(matches!(
            table.allow(0, Direction::Top, 5),
            Err(AlgorithmError::InvalidTileId { id: 5, .. })
        ));
        assert!(matches!(
            table.allow(7, Direction::Top, 0),
            Err(AlgorithmError::InvalidTileId { id: 7, .. })
        ));
    }

    // Tests support only records pairs allowed from both sides
    // Verified by building support from the one-sided allowed relation
    #[test]
    fn test_support_requires_both_sides() {
        let mut table = CompatibilityTable::new(3);
        table.allow(0, Direction::Right, 1).unwrap();
        // One-sided so far: tile 1 has not accepted tile 0 on its left
        assert!(table.support(1, Direction::Right).unwrap().is_empty());
        assert!(!table.compatible(0, Direction::Right, 1));

        table.allow(1, Direction::Left, 0).unwrap();
        assert!(table.compatible(0, Direction::Right, 1));
        assert!(table.compatible(1, Direction::Left, 0));
        // A cell whose right neighbor is tile 1 may hold tile 0
        assert_eq!(table.support(1, Direction::Right).unwrap().iter().collect::<Vec<_>>(), vec![0]);
        // A cell whose left neighbor is tile 0 may hold tile 1
        assert_eq!(table.support(0, Direction::Left).unwrap().iter().collect::<Vec<_>>(), vec![1]);
        assert!(table.support(2, Direction::Left).unwrap().is_empty());
    }

    // Tests the universe holds every tile id
    // Verified by constructing the universe empty
    #[test]
    fn test_universe() {
        let table = CompatibilityTable::new(4);
        assert_eq!(table.universe().iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
}
