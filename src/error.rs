use thiserror::Error;

/// Errors produced when parsing tiles, plays or boards from strings.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Tried to parse a string, but it was not the expected length. The given `usize` is the
    /// actual length.
    #[error("string has unexpected length {0}")]
    BadStringLen(usize),
    /// Tried to parse a multi-line or multi-rank string but encountered a line that was not the
    /// expected length. The given `usize` is the actual length.
    #[error("board rank has unexpected length {0}")]
    BadLineLen(usize),
    /// The board string did not describe the expected number of ranks.
    #[error("board has unexpected number of ranks {0}")]
    BadLineCount(usize),
    /// Encountered an unexpected character in a string.
    #[error("unexpected character {0:?}")]
    BadChar(char),
    /// Tried to parse an empty string.
    #[error("empty string")]
    EmptyString,
    /// A generic error type where the given string could not be parsed for some reason.
    #[error("could not parse {0:?}")]
    BadString(String),
    /// The string named a row or column that is not on the board.
    #[error("row {0}, column {1} is not on the board")]
    OutOfBounds(i32, i32),
}

/// The reasons why a requested play (or second-move skip) can be rejected. A rejection never
/// changes the state of the game.
#[derive(Error, Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum InvalidPlay {
    /// There is no piece on the source tile.
    #[error("no piece at the source tile")]
    NoPieceAtSource,
    /// The piece on the source tile does not belong to the team whose turn it is.
    #[error("piece belongs to the other team")]
    WrongTeam,
    /// A second move is pending and the play does not move the piece that made the first move.
    #[error("second move must use the piece that made the first move")]
    SecondMoveWrongPiece,
    /// The destination is not among the piece's legal destinations.
    #[error("destination is not a legal move for this piece")]
    IllegalDestination,
    /// The game is already over.
    #[error("game is not in progress")]
    GameNotInProgress,
    /// A skip was requested but no second move is pending.
    #[error("no second move is pending")]
    NoSecondMoveToSkip,
}

/// Errors returned by [`crate::registry::MatchRegistry`].
#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum RegistryError {
    /// No match is registered under the given id.
    #[error("no match with id {0}")]
    NoSuchMatch(String),
}
