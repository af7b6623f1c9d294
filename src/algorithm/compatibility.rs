//! Per-direction adjacency relation between tile identifiers
//!
//! The table is built once from edge labels (or by hand) and is read-only for
//! the rest of a run. Alongside the raw `allowed` relation it keeps a
//! precomputed `support` relation used by propagation: the tiles a neighbor
//! tile accepts on its facing edge and which accept it back.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, invalid_rule};

/// Index of a tile in the fixed, ordered tile sequence
pub type TileId = usize;

/// One of the four cardinal neighbor directions
///
/// `Top` is the neighbor at `row + 1`: row 0 is the bottom row of the
/// rendered image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Neighbor one row up (`row + 1`)
    Top,
    /// Neighbor one column right (`col + 1`)
    Right,
    /// Neighbor one row down (`row - 1`)
    Bottom,
    /// Neighbor one column left (`col - 1`)
    Left,
}

impl Direction {
    /// All directions in table order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The direction pointing back from the neighbor
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Grid offset as (row delta, col delta)
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (-1, 0),
            Self::Left => (0, -1),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }
}

/// The four edge labels declared for a tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeLabels<L = String> {
    /// Label of the top edge
    pub top: L,
    /// Label of the right edge
    pub right: L,
    /// Label of the bottom edge
    pub bottom: L,
    /// Label of the left edge
    pub left: L,
}

impl<L> EdgeLabels<L> {
    /// Create labels in top, right, bottom, left order
    pub const fn new(top: L, right: L, bottom: L, left: L) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Label on the edge facing `direction`
    pub const fn get(&self, direction: Direction) -> &L {
        match direction {
            Direction::Top => &self.top,
            Direction::Right => &self.right,
            Direction::Bottom => &self.bottom,
            Direction::Left => &self.left,
        }
    }
}

/// Adjacency relation: which tiles may sit next to a tile in each direction
#[derive(Clone, Debug)]
pub struct CompatibilityTable {
    tile_count: usize,
    allowed: Vec<[TileBitset; 4]>,
    support: Vec<[TileBitset; 4]>,
    universe: TileBitset,
}

impl CompatibilityTable {
    /// Create a table for `tile_count` tiles where no pair is compatible
    pub fn new(tile_count: usize) -> Self {
        let empty = || std::array::from_fn(|_| TileBitset::new(tile_count));
        Self {
            tile_count,
            allowed: (0..tile_count).map(|_| empty()).collect(),
            support: (0..tile_count).map(|_| empty()).collect(),
            universe: TileBitset::all(tile_count),
        }
    }

    /// Build the relation from declared edge labels
    ///
    /// A tile `u` is allowed in direction `D` of tile `t` when `u`'s label on
    /// the opposite edge equals `t`'s label on edge `D`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleData` if no tiles are declared
    pub fn from_labels<L: PartialEq>(labels: &[EdgeLabels<L>]) -> Result<Self> {
        if labels.is_empty() {
            return Err(invalid_rule(None, &"no tiles declared"));
        }

        let mut table = Self::new(labels.len());
        for (tile, own) in labels.iter().enumerate() {
            for direction in Direction::ALL {
                let edge = own.get(direction);
                for (other, theirs) in labels.iter().enumerate() {
                    if theirs.get(direction.opposite()) == edge {
                        table.allow(tile, direction, other)?;
                    }
                }
            }
        }

        tracing::debug!(tiles = table.tile_count, "built compatibility table from edge labels");
        Ok(table)
    }

    /// Permit `other` to sit in `direction` of `tile`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileId` if either id is out of range
    pub fn allow(&mut self, tile: TileId, direction: Direction, other: TileId) -> Result<()> {
        self.check(other)?;
        self.allowed
            .get_mut(tile)
            .and_then(|sets| sets.get_mut(direction.index()))
            .ok_or(AlgorithmError::InvalidTileId {
                id: tile,
                tile_count: self.tile_count,
            })?
            .insert(other);
        self.rebuild_support(tile, other, direction);
        Ok(())
    }

    /// Tiles permitted to sit in `direction` of `tile`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileId` if `tile` is out of range
    pub fn allowed(&self, tile: TileId, direction: Direction) -> Result<&TileBitset> {
        lookup(&self.allowed, tile, direction, self.tile_count)
    }

    /// Tiles a cell may hold given `neighbor` sits on its `side`
    ///
    /// Contains `t` exactly when `t ∈ allowed(neighbor, side.opposite())` and
    /// `neighbor ∈ allowed(t, side)`. For label-derived tables the second
    /// condition always holds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileId` if `neighbor` is out of range
    pub fn support(&self, neighbor: TileId, side: Direction) -> Result<&TileBitset> {
        lookup(&self.support, neighbor, side, self.tile_count)
    }

    /// Test whether `other` may sit in `direction` of `tile` under both tiles' rules
    pub fn compatible(&self, tile: TileId, direction: Direction, other: TileId) -> bool {
        self.allowed(tile, direction)
            .is_ok_and(|set| set.contains(other))
            && self
                .allowed(other, direction.opposite())
                .is_ok_and(|set| set.contains(tile))
    }

    /// Number of known tiles
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Set of every known tile id
    pub const fn universe(&self) -> &TileBitset {
        &self.universe
    }

    fn check(&self, tile: TileId) -> Result<()> {
        if tile < self.tile_count {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidTileId {
                id: tile,
                tile_count: self.tile_count,
            })
        }
    }

    // A new allowed pair can only complete the one mutual pair it belongs to,
    // seen from either tile
    fn rebuild_support(&mut self, tile: TileId, other: TileId, direction: Direction) {
        if self.compatible(tile, direction, other) {
            if let Some(set) = self
                .support
                .get_mut(tile)
                .and_then(|sets| sets.get_mut(direction.opposite().index()))
            {
                set.insert(other);
            }
            if let Some(set) = self
                .support
                .get_mut(other)
                .and_then(|sets| sets.get_mut(direction.index()))
            {
                set.insert(tile);
            }
        }
    }
}

fn lookup(
    table: &[[TileBitset; 4]],
    tile: TileId,
    direction: Direction,
    tile_count: usize,
) -> Result<&TileBitset> {
    table
        .get(tile)
        .and_then(|sets| sets.get(direction.index()))
        .ok_or(AlgorithmError::InvalidTileId {
            id: tile,
            tile_count,
        })
}
