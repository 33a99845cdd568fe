use crate::board::state::BoardState;
use crate::error::ParseError;
use crate::game::GameStatus;
use crate::game::GameStatus::Playing;
use crate::pieces::Team;
use crate::pieces::Team::{Blue, Red};
use crate::tiles::Tile;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether each team's Magic piece is still on the board. Once a Magic piece is captured its flag
/// is cleared and never set again for the rest of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagicStatus {
    pub blue: bool,
    pub red: bool,
}

impl MagicStatus {
    /// Whether the given team's Magic piece is alive.
    pub fn alive(&self, team: Team) -> bool {
        match team {
            Blue => self.blue,
            Red => self.red,
        }
    }

    /// Record that the given team's Magic piece has been captured.
    pub(crate) fn kill(&mut self, team: Team) {
        match team {
            Blue => self.blue = false,
            Red => self.red = false,
        }
    }
}

impl Default for MagicStatus {
    fn default() -> Self {
        Self {
            blue: true,
            red: true,
        }
    }
}

/// Where Red is within its special-turn double move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DoubleMove {
    /// No second move is pending.
    #[default]
    Idle,
    /// Red has made the first move of a double move and may now move the piece on the given tile
    /// again (or skip).
    AwaitingSecondMove(Tile),
}

impl DoubleMove {
    /// The tile of the piece that must make the pending second move, if any.
    pub fn pending(&self) -> Option<Tile> {
        match self {
            DoubleMove::Idle => None,
            DoubleMove::AwaitingSecondMove(t) => Some(*t),
        }
    }
}

/// This struct contains all state that changes as the game is played. It is small and `Copy`, so
/// plays are evaluated against a copy and only committed once they are known to be valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    /// Board state, ie, the current pieces on the board.
    pub board: BoardState,
    /// The team whose turn it is.
    pub current_team: Team,
    /// The current turn, starting at 1. A turn is Red's move followed by Blue's.
    pub turn: u32,
    pub magic: MagicStatus,
    pub double_move: DoubleMove,
    /// Current status of the game.
    pub status: GameStatus,
}

impl GameState {
    /// A fresh state on the given board: Red to move, turn 1, both Magic pieces alive.
    pub fn new(fen_str: &str) -> Result<Self, ParseError> {
        Ok(Self::from_board(BoardState::from_fen(fen_str)?))
    }

    pub fn from_board(board: BoardState) -> Self {
        Self {
            board,
            current_team: Red,
            turn: 1,
            magic: MagicStatus::default(),
            double_move: DoubleMove::Idle,
            status: Playing,
        }
    }
}
