use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding a set of tile identifiers
///
/// Tile ids are 0-based indices into the known tile sequence. Ids at or above
/// the capacity are never members. Provides O(1) membership testing and
/// word-wise set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Empty set able to hold ids `0..max_tiles`
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Full set: every id in `0..max_tiles`
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset holding exactly one tile
    pub fn singleton(max_tiles: usize, tile: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Number of tile ids this set can hold
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile id; ids out of range are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Whether `tile` is a member
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Keep only members also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every member of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of members
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate member tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// The `n`-th member in ascending order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, tile) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tile}")?;
        }
        write!(f, "}}")
    }
}
