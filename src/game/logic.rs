use crate::board::geometry::in_home_half;
use crate::board::state::BoardState;
use crate::collections::tileset::TileSet;
use crate::error::InvalidPlay;
use crate::error::InvalidPlay::{
    GameNotInProgress, IllegalDestination, NoPieceAtSource, NoSecondMoveToSkip,
    SecondMoveWrongPiece, WrongTeam,
};
use crate::game::state::{DoubleMove, GameState, MagicStatus};
use crate::game::DrawReason::Stalemate;
use crate::game::GameOutcome::{Draw, Win};
use crate::game::GameStatus::{Over, Playing};
use crate::game::WinReason::{Checkmate, GeneralCaptured};
use crate::game::{GameStatus, PlayOutcome};
use crate::movegen;
use crate::movegen::MoveContext;
use crate::pieces::PieceType::{General, Magic};
use crate::pieces::Team;
use crate::pieces::Team::{Blue, Red};
use crate::play::{Play, PlayRecord};
use crate::rules::Ruleset;
use crate::tiles::{Coords, Tile};
use log::{debug, info};

/// This struct contains the information necessary to implement the game logic, ie, the rules. It
/// provides methods for evaluating a given play or board based on that logic.
///
/// The information stored in this struct does not change over the course of a game. It does not
/// contain the current game state (piece placement, whose turn it is, etc); rather, its methods
/// take such state as arguments.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameLogic {
    pub rules: Ruleset,
}

impl GameLogic {
    pub fn new(rules: Ruleset) -> Self {
        Self { rules }
    }

    /// The tiles whose pieces may not move at all when `team` is to play. On the special turn,
    /// while Blue's Magic is alive, these are all Red pieces standing in Blue's home half.
    /// Otherwise empty.
    pub fn frozen_tiles(
        &self,
        board: &BoardState,
        team: Team,
        turn: u32,
        magic: MagicStatus,
    ) -> TileSet {
        if !(self.rules.zone_freeze
            && self.rules.is_special_turn(turn)
            && magic.blue
            && team == Red)
        {
            return TileSet::empty();
        }
        let mut frozen = board.occupied_by_team(Red);
        frozen.retain(|t| in_home_half(Coords::from(t), Blue));
        frozen
    }

    /// The context in which `team` would move on the given board.
    fn context(
        &self,
        board: &BoardState,
        team: Team,
        turn: u32,
        magic: MagicStatus,
        second_move: bool,
    ) -> MoveContext {
        MoveContext {
            acting_team: team,
            magic,
            turn,
            second_move,
            frozen: self.frozen_tiles(board, team, turn, magic),
        }
    }

    /// The legal destinations of the piece at `from`, given an explicit context.
    pub fn legal_destinations(&self, board: &BoardState, from: Tile, ctx: &MoveContext) -> TileSet {
        movegen::legal_destinations(&self.rules, board, from, ctx)
    }

    /// The legal destinations of the piece at `from` in the given game state. Whether a second
    /// move is pending, and which tiles are frozen, are derived from the state itself. Empty if the
    /// game is over or if a second move is pending for a different piece.
    pub fn destinations_in_state(&self, state: &GameState, from: Tile) -> TileSet {
        if state.status != Playing {
            return TileSet::empty();
        }
        if let Some(pending) = state.double_move.pending() {
            if pending != from {
                return TileSet::empty();
            }
        }
        let ctx = self.context(
            &state.board,
            state.current_team,
            state.turn,
            state.magic,
            state.double_move.pending().is_some(),
        );
        self.legal_destinations(&state.board, from, &ctx)
    }

    /// Whether `team`'s General is threatened by any enemy Attack, Defense or Support piece. A team
    /// with no General on the board is treated as being in check.
    pub fn is_general_in_check(&self, board: &BoardState, team: Team, magic: MagicStatus) -> bool {
        let Some(general) = board.find_general(team) else {
            return true;
        };
        board
            .occupied_by_team(team.other())
            .into_iter()
            .any(|t| movegen::threatened_tiles(board, t, magic).contains(general))
    }

    /// Whether `team` is in check and every legal move it could make leaves its General in check.
    /// Hypothetical moves are applied to a scratch copy of the board and undone after testing; the
    /// Magic flags are not re-derived from the hypothetical board.
    pub fn is_checkmate(
        &self,
        board: &BoardState,
        team: Team,
        magic: MagicStatus,
        turn: u32,
        frozen: &TileSet,
    ) -> bool {
        if !self.is_general_in_check(board, team, magic) {
            return false;
        }
        let ctx = MoveContext {
            acting_team: team,
            magic,
            turn,
            second_move: false,
            frozen: *frozen,
        };
        let mut scratch = *board;
        for from in board.occupied_by_team(team) {
            for to in self.legal_destinations(board, from, &ctx) {
                let captured = scratch.move_piece(from, to);
                let still_in_check = self.is_general_in_check(&scratch, team, magic);
                scratch.undo_move(from, to, captured);
                if !still_in_check {
                    return false;
                }
            }
        }
        true
    }

    /// Whether `team` has no legal move at all. This does not consider check, so callers should
    /// test for checkmate first.
    pub fn is_stalemate(
        &self,
        board: &BoardState,
        team: Team,
        magic: MagicStatus,
        turn: u32,
        frozen: &TileSet,
    ) -> bool {
        let ctx = MoveContext {
            acting_team: team,
            magic,
            turn,
            second_move: false,
            frozen: *frozen,
        };
        board
            .occupied_by_team(team)
            .into_iter()
            .all(|from| self.legal_destinations(board, from, &ctx).is_empty())
    }

    /// The status of the game once `state.current_team` is about to play.
    fn evaluate_status(&self, state: &GameState) -> GameStatus {
        let team = state.current_team;
        let frozen = self.frozen_tiles(&state.board, team, state.turn, state.magic);
        if self.is_checkmate(&state.board, team, state.magic, state.turn, &frozen) {
            Over(Win(Checkmate, team.other()))
        } else if self.is_stalemate(&state.board, team, state.magic, state.turn, &frozen) {
            Over(Draw(Stalemate))
        } else {
            Playing
        }
    }

    /// Hand the move to the other team, starting a new turn when Blue has finished.
    fn advance_turn(state: &mut GameState) {
        match state.current_team {
            Red => state.current_team = Blue,
            Blue => {
                state.current_team = Red;
                state.turn += 1;
            }
        }
        state.double_move = DoubleMove::Idle;
    }

    /// Check that the given play is valid in the given state.
    fn validate(&self, play: Play, state: &GameState) -> Result<(), InvalidPlay> {
        if state.status != Playing {
            return Err(GameNotInProgress);
        }
        let piece = state.board.get_piece(play.from).ok_or(NoPieceAtSource)?;
        if piece.team != state.current_team {
            return Err(WrongTeam);
        }
        if let Some(pending) = state.double_move.pending() {
            if play.from != pending {
                return Err(SecondMoveWrongPiece);
            }
        }
        if !self.destinations_in_state(state, play.from).contains(play.to) {
            return Err(IllegalDestination);
        }
        Ok(())
    }

    /// Actually "do" a play: check validity, move the piece, apply any capture, handle the special
    /// turn's double move, switch team and evaluate the game status for the team that plays next.
    ///
    /// The state is taken by value and a new state returned, so a rejected play leaves the
    /// caller's state untouched.
    pub fn do_play(
        &self,
        play: Play,
        mut state: GameState,
    ) -> Result<(GameState, PlayRecord), InvalidPlay> {
        if let Err(e) = self.validate(play, &state) {
            debug!("Rejected play {play} by {}: {e}", state.current_team);
            return Err(e);
        }
        let team = state.current_team;
        let turn = state.turn;
        let was_second_move = state.double_move.pending().is_some();

        let captured = state.board.move_piece(play.from, play.to);
        if let Some(c) = captured {
            if c.piece_type == Magic && state.magic.alive(c.team) {
                state.magic.kill(c.team);
                info!("{} Magic captured on turn {turn}; it may no longer retreat", c.team);
            }
            if c.piece_type == General {
                state.status = Over(Win(GeneralCaptured, team));
                state.double_move = DoubleMove::Idle;
            }
        }

        let mut second_move_pending = false;
        if state.status == Playing
            && self.rules.double_move
            && team == Red
            && self.rules.is_special_turn(turn)
            && state.magic.red
            && !was_second_move
            && in_home_half(Coords::from(play.from), Red)
            && in_home_half(Coords::from(play.to), Red)
        {
            state.double_move = DoubleMove::AwaitingSecondMove(play.to);
            second_move_pending = true;
            info!("Red may move the piece on {} again", play.to);
        } else if state.status == Playing {
            Self::advance_turn(&mut state);
            state.status = self.evaluate_status(&state);
        }

        if let Over(outcome) = state.status {
            info!("Game over on turn {turn}: {outcome:?}");
        }
        let outcome = PlayOutcome {
            captured,
            status: state.status,
            second_move_pending,
        };
        let record = PlayRecord {
            turn,
            team,
            play,
            outcome,
        };
        debug!("Accepted play {record}");
        Ok((state, record))
    }

    /// Decline Red's pending second move, passing play to Blue. The turn number is unchanged.
    pub fn skip_second_move(&self, mut state: GameState) -> Result<GameState, InvalidPlay> {
        if state.status != Playing || state.double_move.pending().is_none() {
            debug!("Rejected skip by {}: {}", state.current_team, NoSecondMoveToSkip);
            return Err(NoSecondMoveToSkip);
        }
        Self::advance_turn(&mut state);
        state.status = self.evaluate_status(&state);
        debug!("Red skipped its second move on turn {}", state.turn);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::state::BoardState;
    use crate::collections::tileset::TileSet;
    use crate::error::InvalidPlay;
    use crate::game::logic::GameLogic;
    use crate::game::state::{DoubleMove, GameState, MagicStatus};
    use crate::game::DrawReason::Stalemate;
    use crate::game::GameOutcome::{Draw, Win};
    use crate::game::GameStatus::{Over, Playing};
    use crate::game::WinReason::{Checkmate, GeneralCaptured};
    use crate::pieces::Team::{Blue, Red};
    use crate::pieces::{Piece, PieceType};
    use crate::play::Play;
    use crate::preset::{boards, rules};
    use crate::tiles::Tile;
    use std::str::FromStr;

    fn logic() -> GameLogic {
        GameLogic::new(rules::STANDARD)
    }

    fn play(s: &str) -> Play {
        Play::from_str(s).unwrap()
    }

    fn state_from(fen: &str) -> GameState {
        GameState::new(fen).unwrap()
    }

    #[test]
    fn test_check() {
        let logic = logic();
        let magic = MagicStatus::default();
        // Blue Attack on 5E looks straight down the column at Red's General on 9E.
        let board = BoardState::from_fen("4G4/9/9/9/9/4A4/9/9/9/4g4").unwrap();
        assert!(logic.is_general_in_check(&board, Red, magic));
        assert!(!logic.is_general_in_check(&board, Blue, magic));
        // Blocked by a Red Defense.
        let board = BoardState::from_fen("4G4/9/9/9/9/4A4/9/4d4/9/4g4").unwrap();
        assert!(!logic.is_general_in_check(&board, Red, magic));
        // A Blue Defense on the same column does not threaten (it captures only along rows).
        let board = BoardState::from_fen("4G4/9/9/9/9/4D4/9/9/9/4g4").unwrap();
        assert!(!logic.is_general_in_check(&board, Red, magic));
        // A missing General counts as being in check.
        let board = BoardState::from_fen("4G4/9/9/9/9/9/9/9/9/9").unwrap();
        assert!(logic.is_general_in_check(&board, Red, magic));
    }

    #[test]
    fn test_check_respects_retreat_restriction() {
        let logic = logic();
        // Red Attack on 3E, Blue General on 0E. Moving up the column is forward for Red.
        let board = BoardState::from_fen("4G4/9/9/4a4/9/9/9/9/9/4g4").unwrap();
        assert!(logic.is_general_in_check(&board, Blue, MagicStatus { blue: true, red: false }));
        // Red Attack on 0E, Blue General on 1E. Striking down the column is a retreat for Red.
        let board = BoardState::from_fen("4a4/4G4/9/9/9/9/9/9/9/4g4").unwrap();
        assert!(logic.is_general_in_check(&board, Blue, MagicStatus::default()));
        assert!(!logic.is_general_in_check(&board, Blue, MagicStatus { blue: true, red: false }));
    }

    #[test]
    fn test_checkmate() {
        let logic = logic();
        let magic = MagicStatus::default();
        // Red General on 8E with a Blue Attack directly above it on 7E and its own Defenses on
        // 8D, 8F and 9E. Defenses only capture along rows, so nothing can take the Attack.
        let board = BoardState::from_fen("4G4/9/9/9/9/9/9/4A4/3dgd3/4d4").unwrap();
        assert!(logic.is_general_in_check(&board, Red, magic));
        assert!(logic.is_checkmate(&board, Red, magic, 3, &TileSet::empty()));
        assert!(!logic.is_stalemate(&board, Red, magic, 3, &TileSet::empty()));
    }

    #[test]
    fn test_not_checkmate_if_attacker_can_be_captured() {
        let logic = logic();
        let magic = MagicStatus::default();
        // As above, plus a Red Support on 6D that can take the Attack diagonally.
        let board = BoardState::from_fen("4G4/9/9/9/9/9/3s5/4A4/3dgd3/4d4").unwrap();
        assert!(logic.is_general_in_check(&board, Red, magic));
        assert!(!logic.is_checkmate(&board, Red, magic, 3, &TileSet::empty()));
        // That capture is a retreat, so it is gone once Red's Magic is dead.
        let no_red_magic = MagicStatus { blue: true, red: false };
        assert!(logic.is_checkmate(&board, Red, no_red_magic, 3, &TileSet::empty()));
    }

    #[test]
    fn test_stalemate() {
        let logic = logic();
        let magic = MagicStatus::default();
        // Red General on 9E boxed in by Red Magic pieces that have nowhere to go inside their
        // zone. Blue's Magic on 7E blocks the only zone tile and threatens nothing.
        let board = BoardState::from_fen("4G4/9/9/9/9/9/9/4M4/4m4/3mgm3").unwrap();
        assert!(!logic.is_general_in_check(&board, Red, magic));
        assert!(logic.is_stalemate(&board, Red, magic, 3, &TileSet::empty()));
        assert!(!logic.is_checkmate(&board, Red, magic, 3, &TileSet::empty()));
        // A frozen piece contributes no moves either.
        let board = BoardState::from_fen("4G4/9/9/a8/9/9/9/4M4/4m4/3mgm3").unwrap();
        assert!(!logic.is_stalemate(&board, Red, magic, 3, &TileSet::empty()));
        let frozen = logic.frozen_tiles(&board, Red, 11, magic);
        assert_eq!(frozen.count(), 1);
        assert!(logic.is_stalemate(&board, Red, magic, 11, &frozen));
    }

    #[test]
    fn test_frozen_tiles() {
        let logic = logic();
        let board = BoardState::from_fen("9/9/9/a3a4/9/4a4/9/9/9/9").unwrap();
        let magic = MagicStatus::default();
        let frozen = logic.frozen_tiles(&board, Red, 11, magic);
        assert_eq!(
            frozen,
            [Tile::new(3, 0), Tile::new(3, 4)].into_iter().collect::<TileSet>()
        );
        assert!(logic.frozen_tiles(&board, Red, 10, magic).is_empty());
        assert!(logic.frozen_tiles(&board, Blue, 11, magic).is_empty());
        let blue_dead = MagicStatus { blue: false, red: true };
        assert!(logic.frozen_tiles(&board, Red, 11, blue_dead).is_empty());
        let no_magic_turn = GameLogic::new(rules::NO_MAGIC_TURN);
        assert!(no_magic_turn.frozen_tiles(&board, Red, 11, magic).is_empty());
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let logic = logic();
        let state = state_from(boards::STANDARD);
        assert_eq!(logic.do_play(play("5E-4E"), state), Err(InvalidPlay::NoPieceAtSource));
        assert_eq!(logic.do_play(play("2A-3A"), state), Err(InvalidPlay::WrongTeam));
        assert_eq!(logic.do_play(play("7A-7B"), state), Err(InvalidPlay::IllegalDestination));
        assert_eq!(logic.do_play(play("9E-8D"), state), Err(InvalidPlay::IllegalDestination));
        assert_eq!(logic.skip_second_move(state), Err(InvalidPlay::NoSecondMoveToSkip));

        let mut over = state;
        over.status = Over(Draw(Stalemate));
        assert_eq!(logic.do_play(play("7A-6A"), over), Err(InvalidPlay::GameNotInProgress));
    }

    #[test]
    fn test_turn_sequence() {
        let logic = logic();
        let state = state_from(boards::STANDARD);
        let (state, record) = logic.do_play(play("7A-6A"), state).unwrap();
        assert_eq!(record.turn, 1);
        assert_eq!(record.team, Red);
        assert_eq!(record.outcome.captured, None);
        assert_eq!(state.current_team, Blue);
        assert_eq!(state.turn, 1);
        let (state, record) = logic.do_play(play("2A-3A"), state).unwrap();
        assert_eq!(record.team, Blue);
        assert_eq!(state.current_team, Red);
        assert_eq!(state.turn, 2);
        assert_eq!(state.status, Playing);
    }

    #[test]
    fn test_general_capture_ends_game() {
        let logic = logic();
        // Red Attack on 5E takes Blue's General on 0E. Blue would otherwise have no moves.
        let state = state_from("4G4/9/9/9/9/4a4/9/9/9/4g4");
        let (state, record) = logic.do_play(play("5E-0E"), state).unwrap();
        assert_eq!(record.outcome.captured, Some(Piece::blue(PieceType::General)));
        assert_eq!(state.status, Over(Win(GeneralCaptured, Red)));
        assert_eq!(record.outcome.status, state.status);
        assert_eq!(state.current_team, Red);
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_magic_capture() {
        let logic = logic();
        // Red Attack on 6E takes Blue's Magic on 3E.
        let state = state_from("4G4/9/9/4M4/9/9/4a4/9/9/4g4");
        let (state, record) = logic.do_play(play("6E-3E"), state).unwrap();
        assert_eq!(record.outcome.captured, Some(Piece::blue(PieceType::Magic)));
        assert_eq!(state.magic, MagicStatus { blue: false, red: true });
    }

    #[test]
    fn test_double_move_and_skip() {
        let logic = logic();
        let mut state = state_from(boards::STANDARD);
        state.turn = 11;
        let (state, record) = logic.do_play(play("7A-5A"), state).unwrap();
        assert!(record.outcome.second_move_pending);
        assert_eq!(state.double_move, DoubleMove::AwaitingSecondMove(Tile::new(5, 0)));
        assert_eq!(state.current_team, Red);
        assert_eq!(state.turn, 11);
        assert_eq!(
            logic.do_play(play("7B-6B"), state),
            Err(InvalidPlay::SecondMoveWrongPiece)
        );
        // Crossing into Blue's half is allowed as the second move.
        let (after_second, record) = logic.do_play(play("5A-3A"), state).unwrap();
        assert!(!record.outcome.second_move_pending);
        assert_eq!(after_second.current_team, Blue);
        assert_eq!(after_second.turn, 11);
        assert_eq!(after_second.double_move, DoubleMove::Idle);

        let skipped = logic.skip_second_move(state).unwrap();
        assert_eq!(skipped.current_team, Blue);
        assert_eq!(skipped.turn, 11);
        assert_eq!(skipped.double_move, DoubleMove::Idle);
        assert_eq!(skipped.board, state.board);
    }

    #[test]
    fn test_skip_evaluates_status_for_blue() {
        let logic = logic();
        // Blue's General on 0E is walled in by its own Magic pieces, and the Magic on 1E can only
        // step to 2E, where a Red Defense stands.
        let mut state = state_from("3MGM3/4M4/4d4/9/9/9/8d/9/9/4g4");
        state.turn = 11;
        let (state, record) = logic.do_play(play("6I-5I"), state).unwrap();
        assert!(record.outcome.second_move_pending);
        assert_eq!(record.outcome.status, Playing);
        assert_eq!(state.status, Playing);

        let skipped = logic.skip_second_move(state).unwrap();
        assert_eq!(skipped.current_team, Blue);
        assert_eq!(skipped.turn, 11);
        assert_eq!(skipped.status, Over(Draw(Stalemate)));
        assert_eq!(
            logic.skip_second_move(skipped),
            Err(InvalidPlay::NoSecondMoveToSkip)
        );
    }

    #[test]
    fn test_no_double_move_when_leaving_home_half() {
        let logic = logic();
        let mut state = state_from("4G4/9/9/9/9/9/9/9/a8/4g4");
        state.turn = 11;
        let (state, record) = logic.do_play(play("8A-4A"), state).unwrap();
        assert!(!record.outcome.second_move_pending);
        assert_eq!(state.current_team, Blue);
    }

    #[test]
    fn test_no_double_move_without_red_magic() {
        let logic = logic();
        let mut state = state_from(boards::STANDARD);
        state.turn = 11;
        state.magic.red = false;
        let (state, record) = logic.do_play(play("7A-6A"), state).unwrap();
        assert!(!record.outcome.second_move_pending);
        assert_eq!(state.current_team, Blue);
    }

    #[test]
    fn test_checkmate_ends_game() {
        let logic = logic();
        // Blue Attack slides along row 7 to stand directly above Red's General.
        let mut state = state_from("4G4/9/9/9/9/9/9/A8/3dgd3/4d4");
        state.current_team = Blue;
        let (state, record) = logic.do_play(play("7A-7E"), state).unwrap();
        assert_eq!(state.status, Over(Win(Checkmate, Blue)));
        assert_eq!(record.outcome.status, state.status);
        assert_eq!(state.current_team, Red);
        assert_eq!(state.turn, 2);
    }
}
