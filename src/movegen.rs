//! Legal-destination generation.
//!
//! Each piece type has a raw movement rule (rays or single steps). The raw destinations are then
//! narrowed, in order, by the retreat restriction (a team whose Magic piece is dead may not move
//! backwards), the special-turn zone freeze and the second-move restriction.

use crate::board::geometry::{in_home_half, in_magic_zone, in_palace};
use crate::board::state::BoardState;
use crate::collections::tileset::TileSet;
use crate::game::state::MagicStatus;
use crate::pieces::PieceType::{Attack, Defense, General, Magic, Support};
use crate::pieces::Team::{Blue, Red};
use crate::pieces::{Piece, Team};
use crate::rules::Ruleset;
use crate::tiles::{Coords, RowColOffset, Tile, DIAGONALS, ORTHOGONALS};

/// Everything other than the board that decides which moves are legal for a piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MoveContext {
    /// The team whose turn it is. Pieces of the other team have no legal destinations.
    pub acting_team: Team,
    pub magic: MagicStatus,
    pub turn: u32,
    /// Whether this is the second half of Red's special-turn double move.
    pub second_move: bool,
    /// Tiles whose pieces may not move at all.
    pub frozen: TileSet,
}

/// The tiles along a ray from (but not including) a starting tile, up to the edge of the board.
struct Ray {
    next: Coords,
    step: RowColOffset,
}

impl Ray {
    fn new(from: Tile, step: RowColOffset) -> Self {
        Self {
            next: Coords::from(from) + step,
            step,
        }
    }
}

impl Iterator for Ray {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = Tile::try_from(self.next).ok()?;
        self.next = self.next + self.step;
        Some(tile)
    }
}

/// Slide along a ray until blocked. The first occupied tile stops the ray and is only included if
/// `may_capture` is set and it holds an enemy piece.
fn slide(board: &BoardState, from: Tile, team: Team, step: RowColOffset, may_capture: bool) -> TileSet {
    let mut dests = TileSet::empty();
    for t in Ray::new(from, step) {
        match board.get_piece(t) {
            None => dests.insert(t),
            Some(other) => {
                if may_capture && other.team != team {
                    dests.insert(t);
                }
                break;
            }
        }
    }
    dests
}

/// Single orthogonal steps onto empty tiles inside the zone described by `zone`.
fn step_within(
    board: &BoardState,
    from: Tile,
    team: Team,
    zone: fn(Coords, Team) -> bool,
) -> TileSet {
    let mut dests = TileSet::empty();
    for step in ORTHOGONALS {
        let coords = Coords::from(from) + step;
        if !zone(coords, team) {
            continue;
        }
        if let Ok(t) = Tile::try_from(coords) {
            if !board.tile_occupied(t) {
                dests.insert(t);
            }
        }
    }
    dests
}

/// The destinations permitted by the moving piece's own rule, ignoring retreat restrictions and
/// turn effects.
pub fn raw_destinations(board: &BoardState, from: Tile, piece: Piece) -> TileSet {
    let team = piece.team;
    let mut dests = TileSet::empty();
    match piece.piece_type {
        Attack => {
            for step in ORTHOGONALS {
                dests |= slide(board, from, team, step, step.is_vertical());
            }
        }
        Defense => {
            for step in ORTHOGONALS {
                dests |= slide(board, from, team, step, step.is_horizontal());
            }
        }
        Support => {
            for step in DIAGONALS {
                dests |= slide(board, from, team, step, true);
            }
        }
        Magic => dests = step_within(board, from, team, in_magic_zone),
        General => dests = step_within(board, from, team, in_palace),
    }
    dests
}

/// Whether moving from `from` to `to` is a retreat for `team`. A diagonal retreat also changes
/// row, so it is covered by the same test.
pub fn is_retreat(from: Tile, to: Tile, team: Team) -> bool {
    team.is_retreat(from.row as i32, to.row as i32)
}

/// Remove from `dests` every destination that would be a retreat from `from`.
pub fn remove_retreats(from: Tile, team: Team, dests: &mut TileSet) {
    dests.retain(|to| !is_retreat(from, to, team));
}

/// The tiles the piece at `from` could capture on (or move to) when looking for threats to a
/// General. Empty for Magic and General pieces, which never capture. The retreat restriction of
/// the piece's own team applies.
pub fn threatened_tiles(board: &BoardState, from: Tile, magic: MagicStatus) -> TileSet {
    let Some(piece) = board.get_piece(from) else {
        return TileSet::empty();
    };
    if !piece.piece_type.can_capture() {
        return TileSet::empty();
    }
    let mut dests = raw_destinations(board, from, piece);
    if !magic.alive(piece.team) {
        remove_retreats(from, piece.team, &mut dests);
    }
    dests
}

/// The legal destinations of the piece at `from`. Empty (rather than an error) when there is no
/// piece there, it belongs to the other team, or it is frozen.
pub fn legal_destinations(
    rules: &Ruleset,
    board: &BoardState,
    from: Tile,
    ctx: &MoveContext,
) -> TileSet {
    let Some(piece) = board.get_piece(from) else {
        return TileSet::empty();
    };
    if piece.team != ctx.acting_team || ctx.frozen.contains(from) {
        return TileSet::empty();
    }

    let mut dests = raw_destinations(board, from, piece);
    if !ctx.magic.alive(piece.team) {
        remove_retreats(from, piece.team, &mut dests);
    }

    let in_blue_half = in_home_half(Coords::from(from), Blue);
    if rules.zone_freeze && ctx.magic.blue && in_blue_half {
        if rules.is_special_turn(ctx.turn) && ctx.acting_team == Red {
            return TileSet::empty();
        }
        if ctx.second_move {
            return TileSet::empty();
        }
    }
    dests
}
