pub mod logic;
pub mod state;

use crate::board::state::BoardState;
use crate::collections::tileset::TileSet;
use crate::error::{InvalidPlay, ParseError};
use crate::game::logic::GameLogic;
use crate::game::state::{GameState, MagicStatus};
use crate::pieces::{Piece, Team};
use crate::play::{Play, PlayRecord};
use crate::preset::boards;
use crate::rules::Ruleset;
use crate::tiles::Tile;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The reason why a game has been won.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    /// The other team's General has been captured.
    GeneralCaptured,
    /// The other team is in check and has no move that gets it out of check.
    Checkmate,
}

/// The reason why a game has been drawn.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    /// The team to play has no legal moves and is not in check.
    Stalemate,
}

/// The outcome of a single game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    /// Game has been won by the specified team.
    Win(WinReason, Team),
    /// Game has ended in a draw.
    Draw(DrawReason),
}

/// The current status of the game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// Game is still being played.
    Playing,
    /// Game is over, with the given outcome.
    Over(GameOutcome),
}

impl GameStatus {
    /// The winning team, if the game has been won.
    pub fn winner(&self) -> Option<Team> {
        match self {
            GameStatus::Over(GameOutcome::Win(_, team)) => Some(*team),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

/// The result of a successful play.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayOutcome {
    /// The piece that was captured, if any.
    pub captured: Option<Piece>,
    /// The status of the game after the play.
    pub status: GameStatus,
    /// Whether the same team must now make (or skip) a second move with the piece it just moved.
    pub second_move_pending: bool,
}

/// A struct representing a single match, including all state and associated information (such as
/// rules) needed to play. This struct also keeps a record of all previous plays.
///
/// The game state can only be changed through [`Game::do_play`] and [`Game::skip_second_move`],
/// each of which either applies fully or leaves the game untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Game {
    logic: GameLogic,
    state: GameState,
    play_history: Vec<PlayRecord>,
}

impl Game {
    /// Create a new [`Game`] from the given rules and starting position (in FEN-like format).
    pub fn new(rules: Ruleset, starting_board: &str) -> Result<Self, ParseError> {
        Ok(Self::from_state(rules, GameState::new(starting_board)?))
    }

    /// Create a new [`Game`] that continues from the given state.
    pub fn from_state(rules: Ruleset, state: GameState) -> Self {
        Self {
            logic: GameLogic::new(rules),
            state,
            play_history: vec![],
        }
    }

    /// Actually "do" a play, checking validity and applying its outcome. Returns a description of
    /// the outcome, or the reason the play was rejected (in which case nothing changes).
    pub fn do_play(&mut self, play: Play) -> Result<PlayOutcome, InvalidPlay> {
        let (state, record) = self.logic.do_play(play, self.state)?;
        self.state = state;
        self.play_history.push(record);
        Ok(record.outcome)
    }

    /// Decline a pending second move, passing play to Blue.
    pub fn skip_second_move(&mut self) -> Result<(), InvalidPlay> {
        self.state = self.logic.skip_second_move(self.state)?;
        Ok(())
    }

    /// The legal destinations of the piece at the given tile. Empty if there is no piece there, it
    /// is not that team's turn, the game is over or another piece has a second move pending.
    pub fn legal_destinations(&self, tile: Tile) -> TileSet {
        self.logic.destinations_in_state(&self.state, tile)
    }

    /// All plays the team to move could make right now.
    pub fn legal_plays(&self) -> Vec<Play> {
        self.state
            .board
            .occupied_by_team(self.state.current_team)
            .into_iter()
            .flat_map(|from| {
                self.legal_destinations(from)
                    .into_iter()
                    .map(move |to| Play::new(from, to))
            })
            .collect()
    }

    pub fn logic(&self) -> &GameLogic {
        &self.logic
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &BoardState {
        &self.state.board
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn current_team(&self) -> Team {
        self.state.current_team
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn magic(&self) -> MagicStatus {
        self.state.magic
    }

    /// The tile of the piece that has a second move pending, if any.
    pub fn pending_second_move(&self) -> Option<Tile> {
        self.state.double_move.pending()
    }

    /// Whether the team to move is currently in check.
    pub fn in_check(&self) -> bool {
        self.logic
            .is_general_in_check(&self.state.board, self.state.current_team, self.state.magic)
    }

    /// Every accepted play so far, oldest first.
    pub fn play_history(&self) -> &[PlayRecord] {
        &self.play_history
    }
}

impl Default for Game {
    fn default() -> Self {
        create_initial_match()
    }
}

/// A new match on the standard board with the standard rules: Red to move, turn 1.
pub fn create_initial_match() -> Game {
    Game::from_state(
        Ruleset::default(),
        GameState::from_board(boards::standard_layout()),
    )
}
