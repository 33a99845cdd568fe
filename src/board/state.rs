use crate::board::geometry::{tile_in_bounds, COLS, ROWS};
use crate::collections::tileset::TileSet;
use crate::error::ParseError;
use crate::error::ParseError::{BadLineCount, BadLineLen};
use crate::pieces::PieceType::General;
use crate::pieces::{Piece, Team};
use crate::tile_iter::TileIterator;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store information on the current board state (ie, pieces): a 10x9 grid where each tile holds at
/// most one piece.
///
/// The grid is small and `Copy`, so a whole board can be snapshotted cheaply. Game logic (move
/// validity and so on) lives elsewhere; this struct only gets and sets pieces.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Default, Debug)]
pub struct BoardState {
    grid: [[Option<Piece>; COLS as usize]; ROWS as usize],
}

impl BoardState {
    /// An empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the piece that occupies the given tile, if any. Tiles off the board are always empty.
    pub fn get_piece(&self, t: Tile) -> Option<Piece> {
        self.grid
            .get(t.row as usize)
            .and_then(|row| row.get(t.col as usize))
            .copied()
            .flatten()
    }

    /// Place the given piece at the given tile, replacing whatever was there. Tiles off the board
    /// are ignored.
    pub fn set_piece(&mut self, t: Tile, piece: Piece) {
        if tile_in_bounds(t) {
            self.grid[t.row as usize][t.col as usize] = Some(piece);
        }
    }

    /// Clear a tile, returning the piece that was on it.
    pub fn clear_tile(&mut self, t: Tile) -> Option<Piece> {
        if tile_in_bounds(t) {
            self.grid[t.row as usize][t.col as usize].take()
        } else {
            None
        }
    }

    /// Check if there is any piece occupying a tile.
    pub fn tile_occupied(&self, t: Tile) -> bool {
        self.get_piece(t).is_some()
    }

    /// Move a piece from one tile to another. This does not check whether a move is valid; the
    /// piece at `to`, if any, is simply replaced. Returns the replaced (captured) piece. Does
    /// nothing if `from` is empty.
    pub fn move_piece(&mut self, from: Tile, to: Tile) -> Option<Piece> {
        let piece = self.clear_tile(from)?;
        let captured = self.clear_tile(to);
        self.set_piece(to, piece);
        captured
    }

    /// Reverse a [`Self::move_piece`] call, given the piece it returned.
    pub fn undo_move(&mut self, from: Tile, to: Tile, captured: Option<Piece>) {
        if let Some(piece) = self.clear_tile(to) {
            self.set_piece(from, piece);
        }
        if let Some(c) = captured {
            self.set_piece(to, c);
        }
    }

    /// Iterate over all occupied tiles and their pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Tile, Piece)> + '_ {
        TileIterator::new().filter_map(|t| self.get_piece(t).map(|p| (t, p)))
    }

    /// Return the set of tiles occupied by pieces of the given team.
    pub fn occupied_by_team(&self, team: Team) -> TileSet {
        self.pieces()
            .filter(|(_, p)| p.team == team)
            .map(|(t, _)| t)
            .collect()
    }

    /// Count the number of pieces of the given team left on the board.
    pub fn count_pieces(&self, team: Team) -> u8 {
        self.occupied_by_team(team).count() as u8
    }

    /// Get the tile on which the given team's General stands, if it is still on the board.
    pub fn find_general(&self, team: Team) -> Option<Tile> {
        self.pieces()
            .find(|(_, p)| *p == Piece::new(General, team))
            .map(|(t, _)| t)
    }

    /// Parse board state from a string in FEN-like format: ten ranks separated by `/`, row 0
    /// first, with digits standing for runs of empty tiles.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let mut state = Self::default();
        let ranks: Vec<&str> = fen.trim().split('/').collect();
        if ranks.len() != ROWS as usize {
            return Err(BadLineCount(ranks.len()));
        }
        for (r, line) in ranks.into_iter().enumerate() {
            let mut n_empty = 0usize;
            let mut c = 0usize;
            for chr in line.chars() {
                if let Some(d) = chr.to_digit(10) {
                    n_empty = (n_empty * 10) + d as usize;
                    if c + n_empty > COLS as usize {
                        return Err(BadLineLen(c + n_empty));
                    }
                } else {
                    c += n_empty;
                    n_empty = 0;
                    if c >= COLS as usize {
                        return Err(BadLineLen(c + 1));
                    }
                    state.grid[r][c] = Some(Piece::try_from(chr)?);
                    c += 1;
                }
            }
            c += n_empty;
            if c != COLS as usize {
                return Err(BadLineLen(c));
            }
        }
        Ok(state)
    }

    /// Return a string in FEN-like format representing the board state.
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        for (r, row) in self.grid.iter().enumerate() {
            if r > 0 {
                s.push('/');
            }
            let mut n_empty = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if n_empty > 0 {
                            s.push_str(&n_empty.to_string());
                            n_empty = 0;
                        }
                        s.push((*piece).into());
                    }
                    None => n_empty += 1,
                }
            }
            if n_empty > 0 {
                s.push_str(&n_empty.to_string());
            }
        }
        s
    }

    /// Parse board state from a string in the format output by [`Self::to_display_str`].
    pub fn from_display_str(display_str: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = display_str.trim().lines().map(str::trim).collect();
        if lines.len() != ROWS as usize {
            return Err(BadLineCount(lines.len()));
        }
        let mut state = Self::default();
        for (r, line) in lines.into_iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != COLS as usize {
                return Err(BadLineLen(chars.len()));
            }
            for (c, chr) in chars.into_iter().enumerate() {
                if chr != '.' {
                    state.grid[r][c] = Some(Piece::try_from(chr)?);
                }
            }
        }
        Ok(state)
    }

    /// Return a string representing the board state, in a format suitable for printing.
    pub fn to_display_str(&self) -> String {
        let mut s = String::new();
        for row in &self.grid {
            for cell in row {
                match cell {
                    Some(piece) => s.push((*piece).into()),
                    None => s.push('.'),
                }
            }
            s.push('\n');
        }
        s
    }
}

impl FromStr for BoardState {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_str())
    }
}
