use crate::error::ParseError;
use crate::error::ParseError::BadString;
use crate::game::PlayOutcome;
use crate::pieces::Team;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single move of a piece from one tile to another. (Named "Play" rather than "Move" as the
/// lower-cased version of the latter would clash with the Rust keyword.)
///
/// A play says nothing about whether the move is legal; that is decided against a game state.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct Play {
    pub from: Tile,
    pub to: Tile,
}

impl Play {
    pub fn new(from: Tile, to: Tile) -> Self {
        Self { from, to }
    }
}

impl FromStr for Play {
    type Err = ParseError;

    /// Parse a play in the form `7E-6E`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.trim().split('-').collect();
        if tokens.len() != 2 {
            return Err(BadString(String::from(s)));
        };
        Ok(Self::new(Tile::from_str(tokens[0])?, Tile::from_str(tokens[1])?))
    }
}

impl Display for Play {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// A record of a single accepted play.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayRecord {
    /// The turn on which the play was made.
    pub turn: u32,
    /// The team that made the play.
    pub team: Team,
    /// Details of the play (piece movement) itself.
    pub play: Play,
    /// Details of the outcome of the play.
    pub outcome: PlayOutcome,
}

impl Display for PlayRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} {}", self.turn, self.team, self.play)?;
        if let Some(piece) = self.outcome.captured {
            write!(f, " takes {piece}")?;
        }
        Ok(())
    }
}
