//! Fixed geometry of the 10x9 board: bounds and the team zones. Every predicate here is a pure
//! function of coordinates and returns `false` for anything off the board.

use crate::pieces::Team;
use crate::pieces::Team::{Blue, Red};
use crate::tiles::{Coords, Tile};
use std::ops::RangeInclusive;

/// Number of rows on the board.
pub const ROWS: u8 = 10;
/// Number of columns on the board.
pub const COLS: u8 = 9;

/// The three central columns shared by the palaces and magic zones.
const CENTRE_COLS: RangeInclusive<i32> = 3..=5;

/// Whether the given coordinates lie on the board.
pub fn coords_in_bounds(coords: Coords) -> bool {
    (0..ROWS as i32).contains(&coords.row) && (0..COLS as i32).contains(&coords.col)
}

/// Whether the given tile lies on the board.
pub fn tile_in_bounds(tile: Tile) -> bool {
    tile.row < ROWS && tile.col < COLS
}

fn home_rows(team: Team) -> RangeInclusive<i32> {
    match team {
        Blue => 0..=4,
        Red => 5..=9,
    }
}

fn palace_rows(team: Team) -> RangeInclusive<i32> {
    match team {
        Blue => 0..=2,
        Red => 7..=9,
    }
}

fn magic_rows(team: Team) -> RangeInclusive<i32> {
    match team {
        Blue => 2..=4,
        Red => 5..=7,
    }
}

/// Whether the coordinates lie in the given team's home half (rows 0-4 for Blue, 5-9 for Red).
pub fn in_home_half(coords: Coords, team: Team) -> bool {
    coords_in_bounds(coords) && home_rows(team).contains(&coords.row)
}

/// Whether the coordinates lie in the given team's palace, where its General may move.
pub fn in_palace(coords: Coords, team: Team) -> bool {
    palace_rows(team).contains(&coords.row) && CENTRE_COLS.contains(&coords.col)
}

/// Whether the coordinates lie in the given team's magic zone, where its Magic piece may move.
pub fn in_magic_zone(coords: Coords, team: Team) -> bool {
    magic_rows(team).contains(&coords.row) && CENTRE_COLS.contains(&coords.col)
}
