use crate::error::ParseError;
use crate::error::ParseError::BadChar;
use crate::pieces::PieceType::{Attack, Defense, General, Magic, Support};
use crate::pieces::Team::{Blue, Red};
use std::fmt::{Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The five kinds of piece. Each has its own movement and capture rule.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    /// Moves any distance orthogonally; captures only along its column.
    Attack,
    /// Moves any distance orthogonally; captures only along its row.
    Defense,
    /// Moves any distance diagonally and captures diagonally.
    Support,
    /// Moves one step within its team's magic zone. Never captures. While alive, lets its team
    /// retreat.
    Magic,
    /// Moves one step within its team's palace. Never captures. Losing it loses the game.
    General,
}

impl PieceType {
    /// Whether a piece of this type can ever capture (and so give check).
    pub fn can_capture(self) -> bool {
        matches!(self, Attack | Defense | Support)
    }
}

/// The two teams. Blue starts in rows 0-4, Red in rows 5-9.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// The opposing team.
    pub fn other(self) -> Self {
        match self {
            Blue => Red,
            Red => Blue,
        }
    }

    /// Whether moving from row `from` to row `to` takes a piece of this team back towards its own
    /// back rank.
    pub fn is_retreat(self, from: i32, to: i32) -> bool {
        match self {
            Blue => to < from,
            Red => to > from,
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Blue => write!(f, "Blue"),
            Red => write!(f, "Red"),
        }
    }
}

/// A single piece: a type and the team it belongs to. Pieces are plain values; moving a piece
/// relocates the value on the board.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub piece_type: PieceType,
    pub team: Team,
}

impl Piece {
    pub const fn new(piece_type: PieceType, team: Team) -> Self {
        Self { piece_type, team }
    }

    pub const fn blue(piece_type: PieceType) -> Self {
        Self::new(piece_type, Blue)
    }

    pub const fn red(piece_type: PieceType) -> Self {
        Self::new(piece_type, Red)
    }
}

impl TryFrom<char> for Piece {
    type Error = ParseError;

    /// Blue pieces are upper case, Red pieces lower case.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        let piece_type = match value.to_ascii_lowercase() {
            'a' => Attack,
            'd' => Defense,
            's' => Support,
            'm' => Magic,
            'g' => General,
            _ => return Err(BadChar(value)),
        };
        let team = if value.is_ascii_uppercase() { Blue } else { Red };
        Ok(Self::new(piece_type, team))
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        let c = match piece.piece_type {
            Attack => 'a',
            Defense => 'd',
            Support => 's',
            Magic => 'm',
            General => 'g',
        };
        match piece.team {
            Blue => c.to_ascii_uppercase(),
            Red => c,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.team, self.piece_type)
    }
}
