use crate::board::geometry::{tile_in_bounds, COLS};
use crate::tiles::Tile;
use std::fmt::{Debug, Formatter};
use std::ops::{BitOr, BitOrAssign};

/// A set of tiles on the board. The board has 90 tiles, so the set is a single `u128` with one
/// bit per tile, numbered row by row.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSet {
    bitfield: u128,
}

/// The mask for the given tile, or zero if the tile is off the board.
fn tile_mask(t: Tile) -> u128 {
    if tile_in_bounds(t) {
        1u128 << ((t.row as u32 * COLS as u32) + t.col as u32)
    } else {
        0
    }
}

fn bit_to_tile(bit: u32) -> Tile {
    Tile::new((bit / COLS as u32) as u8, (bit % COLS as u32) as u8)
}

impl TileSet {
    /// Return an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return the number of tiles in the set.
    pub fn count(&self) -> u32 {
        self.bitfield.count_ones()
    }

    /// Check whether the given tile is in the set.
    pub fn contains(&self, t: Tile) -> bool {
        tile_mask(t) & self.bitfield != 0
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bitfield == 0
    }

    /// Add the given tile to the set, if not present. Tiles off the board are ignored.
    pub fn insert(&mut self, t: Tile) {
        self.bitfield |= tile_mask(t)
    }

    /// Remove the given tile from the set, if present.
    pub fn remove(&mut self, t: Tile) {
        self.bitfield &= !tile_mask(t)
    }

    /// Keep only the tiles for which `f` returns `true`.
    pub fn retain<F: FnMut(Tile) -> bool>(&mut self, mut f: F) {
        for t in *self {
            if !f(t) {
                self.remove(t)
            }
        }
    }

    /// Extend this set by adding all the elements of the other set.
    pub fn extend(&mut self, other: &Self) {
        self.bitfield |= other.bitfield
    }

    /// Return a set containing each tile in `self` or `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bitfield: self.bitfield | other.bitfield,
        }
    }

}

impl Debug for TileSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.into_iter().map(|t| t.to_string())).finish()
    }
}

impl FromIterator<Tile> for TileSet {
    fn from_iter<T: IntoIterator<Item = Tile>>(iter: T) -> Self {
        let mut ts = Self::empty();
        for t in iter {
            ts.insert(t)
        }
        ts
    }
}

impl IntoIterator for TileSet {
    type Item = Tile;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> Self::IntoIter {
        TileSetIter { state: self.bitfield }
    }
}

impl IntoIterator for &TileSet {
    type Item = Tile;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> Self::IntoIter {
        TileSetIter { state: self.bitfield }
    }
}

impl BitOr for TileSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl BitOrAssign for TileSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.extend(&rhs)
    }
}

/// An iterator over the tiles in a [`TileSet`], in row-major order.
pub struct TileSetIter {
    /// Bits not yet yielded.
    state: u128,
}

impl Iterator for TileSetIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == 0 {
            return None;
        }
        let bit = self.state.trailing_zeros();
        // Clear the lowest set bit.
        self.state &= self.state - 1;
        Some(bit_to_tile(bit))
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::tileset::TileSet;
    use crate::tiles::Tile;

    #[test]
    fn test_insert_remove() {
        let mut ts = TileSet::empty();
        assert!(ts.is_empty());
        ts.insert(Tile::new(0, 0));
        ts.insert(Tile::new(9, 8));
        ts.insert(Tile::new(4, 4));
        ts.insert(Tile::new(4, 4));
        assert_eq!(ts.count(), 3);
        assert!(ts.contains(Tile::new(9, 8)));
        assert!(!ts.contains(Tile::new(8, 9)));
        ts.remove(Tile::new(0, 0));
        assert_eq!(ts.count(), 2);
        assert!(!ts.contains(Tile::new(0, 0)));
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut ts = TileSet::empty();
        ts.insert(Tile::new(10, 0));
        ts.insert(Tile::new(0, 9));
        ts.insert(Tile::new(255, 255));
        assert!(ts.is_empty());
        assert!(!ts.contains(Tile::new(10, 0)));
    }

    #[test]
    fn test_iter_and_ops() {
        let tiles = [Tile::new(7, 2), Tile::new(1, 3), Tile::new(5, 0)];
        let ts: TileSet = tiles.into_iter().collect();
        let collected: Vec<Tile> = ts.into_iter().collect();
        assert_eq!(collected, vec![Tile::new(1, 3), Tile::new(5, 0), Tile::new(7, 2)]);

        let other: TileSet = [Tile::new(5, 0), Tile::new(6, 6)].into_iter().collect();
        assert_eq!((ts | other).count(), 4);
        let mut extended = ts;
        extended |= other;
        assert_eq!(extended, ts | other);
        assert!(extended.contains(Tile::new(6, 6)));

        let mut retained = ts;
        retained.retain(|t| t.row > 4);
        let expected: TileSet = [Tile::new(5, 0), Tile::new(7, 2)].into_iter().collect();
        assert_eq!(retained, expected);
    }
}
