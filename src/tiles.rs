use crate::board::geometry::{coords_in_bounds, COLS};
use crate::error::ParseError;
use crate::error::ParseError::{BadChar, BadStringLen, EmptyString, OutOfBounds};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

/// Column letters, indexed by column number.
pub const COLUMN_LETTERS: [char; COLS as usize] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// The location of a single tile on the board, ie, row and column. This struct is only a reference
/// to a location on the board, and does not contain any other information such as piece placement.
///
/// A `Tile` is not guaranteed to be in bounds; functions that look up tiles on the board treat an
/// out-of-bounds tile as empty.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Tile {
    pub row: u8,
    pub col: u8,
}

impl Tile {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile(row={}, col={})", self.row, self.col)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match COLUMN_LETTERS.get(self.col as usize) {
            Some(letter) => write!(f, "{}{letter}", self.row),
            None => write!(f, "{}?{}", self.row, self.col),
        }
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    /// Parse a tile written as row digit followed by column letter, eg, `7E`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyString);
        }
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(BadStringLen(chars.len()));
        }
        let row = chars[0].to_digit(10).ok_or(BadChar(chars[0]))? as i32;
        let letter = chars[1].to_ascii_uppercase();
        let col = COLUMN_LETTERS
            .iter()
            .position(|&c| c == letter)
            .ok_or(BadChar(chars[1]))? as i32;
        Tile::try_from(Coords { row, col })
    }
}

/// A row and column offset, eg, a direction of travel along a ray.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RowColOffset {
    pub row: i32,
    pub col: i32,
}

impl RowColOffset {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether the offset only changes the column.
    pub fn is_horizontal(&self) -> bool {
        self.row == 0 && self.col != 0
    }

    /// Whether the offset only changes the row.
    pub fn is_vertical(&self) -> bool {
        self.col == 0 && self.row != 0
    }
}

/// Up, down, left, right.
pub const ORTHOGONALS: [RowColOffset; 4] = [
    RowColOffset::new(-1, 0),
    RowColOffset::new(1, 0),
    RowColOffset::new(0, -1),
    RowColOffset::new(0, 1),
];

pub const DIAGONALS: [RowColOffset; 4] = [
    RowColOffset::new(-1, -1),
    RowColOffset::new(-1, 1),
    RowColOffset::new(1, -1),
    RowColOffset::new(1, 1),
];

/// The row and column of a position which may or may not be on the board. Used for arithmetic on
/// positions (which may take us off the board) and for the zone predicates, which accept any
/// integer coordinates.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<Tile> for Coords {
    fn from(value: Tile) -> Self {
        Self {
            row: value.row as i32,
            col: value.col as i32,
        }
    }
}

impl TryFrom<Coords> for Tile {
    type Error = ParseError;

    fn try_from(value: Coords) -> Result<Self, Self::Error> {
        if coords_in_bounds(value) {
            Ok(Tile::new(value.row as u8, value.col as u8))
        } else {
            Err(OutOfBounds(value.row, value.col))
        }
    }
}

impl Add<RowColOffset> for Coords {
    type Output = Coords;

    fn add(self, rhs: RowColOffset) -> Self::Output {
        Coords {
            row: self.row.saturating_add(rhs.row),
            col: self.col.saturating_add(rhs.col),
        }
    }
}
