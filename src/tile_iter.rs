use crate::board::geometry::{COLS, ROWS};
use crate::tiles::Tile;

/// Iterator over all tiles on the board, row by row.
pub struct TileIterator {
    current_row: u8,
    current_col: u8,
}

impl TileIterator {
    pub(crate) fn new() -> Self {
        Self {
            current_row: 0,
            current_col: 0,
        }
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= ROWS {
            return None;
        }
        let tile = Tile::new(self.current_row, self.current_col);
        if self.current_col >= COLS - 1 {
            self.current_row += 1;
            self.current_col = 0;
        } else {
            self.current_col += 1;
        }
        Some(tile)
    }
}

#[cfg(test)]
mod tests {
    use crate::tile_iter::TileIterator;
    use crate::tiles::Tile;

    #[test]
    fn test_covers_board() {
        let tiles: Vec<Tile> = TileIterator::new().collect();
        assert_eq!(tiles.len(), 90);
        assert_eq!(tiles[0], Tile::new(0, 0));
        assert_eq!(tiles[9], Tile::new(1, 0));
        assert_eq!(tiles[89], Tile::new(9, 8));
    }
}
