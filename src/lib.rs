//! Rules engine for Miku Chess, a two-player game on a 10x9 board.
//!
//! Blue holds rows 0-4 and Red rows 5-9; Red moves first. Each team has Attack, Defense and
//! Support pieces that move along rays, a Magic piece whose survival lets the team retreat, and a
//! General which must not be captured. On the special turn (turn 11 by default) Blue's living Magic
//! freezes Red pieces in Blue's half, while Red's living Magic grants Red a second move.
//!
//! ```
//! use miku_chess::{create_initial_match, GameStatus, Play, Tile};
//! use std::str::FromStr;
//!
//! let mut game = create_initial_match();
//! assert!(game.legal_destinations(Tile::from_str("7A").unwrap()).contains(Tile::new(6, 0)));
//! let outcome = game.do_play(Play::from_str("7A-6A").unwrap()).unwrap();
//! assert_eq!(outcome.status, GameStatus::Playing);
//! ```

#[macro_use]
mod utils;
pub mod board;
pub mod collections;
mod error;
pub mod game;
pub mod movegen;
mod pieces;
pub mod play;
pub mod preset;
pub mod registry;
mod rules;
mod serde_utils;
mod tile_iter;
mod tiles;

pub use crate::{
    board::{BoardState, COLS, ROWS},
    collections::TileSet,
    error::{InvalidPlay, ParseError, RegistryError},
    game::{
        create_initial_match,
        logic::GameLogic,
        state::{DoubleMove, GameState, MagicStatus},
        DrawReason, Game, GameOutcome, GameStatus, PlayOutcome, WinReason,
    },
    pieces::{Piece, PieceType, Team},
    play::{Play, PlayRecord},
    registry::{MatchId, MatchRegistry},
    rules::Ruleset,
    tiles::{Coords, RowColOffset, Tile},
};
