pub mod rules {
    use crate::Ruleset;

    /// The standard rules: magic effects on turn 11.
    pub const STANDARD: Ruleset = Ruleset {
        special_turn: 11,
        zone_freeze: true,
        double_move: true,
    };

    /// Standard movement without the turn-11 effects.
    pub const NO_MAGIC_TURN: Ruleset = Ruleset {
        special_turn: 11,
        zone_freeze: false,
        double_move: false,
    };
}

pub mod boards {
    use crate::board::state::BoardState;
    use crate::pieces::PieceType::{Attack, Defense, General, Magic, Support};
    use crate::pieces::Team::{Blue, Red};
    use crate::pieces::{Piece, PieceType};
    use crate::tiles::Tile;

    /// The standard starting position. Blue (upper case) holds rows 0-4, Red (lower case) rows
    /// 5-9.
    pub const STANDARD: &str = "AAASGSAAA/9/DDDDMDDDD/9/9/9/9/ddddmdddd/9/aaasgsaaa";

    const BACK_RANK: [PieceType; 9] = [
        Attack, Attack, Attack, Support, General, Support, Attack, Attack, Attack,
    ];
    const FRONT_RANK: [PieceType; 9] = [
        Defense, Defense, Defense, Defense, Magic, Defense, Defense, Defense, Defense,
    ];

    /// The [`STANDARD`] position, built piece by piece.
    pub fn standard_layout() -> BoardState {
        let mut board = BoardState::empty();
        for (team, back_row, front_row) in [(Blue, 0, 2), (Red, 9, 7)] {
            for (col, (back, front)) in BACK_RANK.into_iter().zip(FRONT_RANK).enumerate() {
                board.set_piece(Tile::new(back_row, col as u8), Piece::new(back, team));
                board.set_piece(Tile::new(front_row, col as u8), Piece::new(front, team));
            }
        }
        board
    }
}
