/// A set of rules for a game. The standard rules are available as
/// [`crate::preset::rules::STANDARD`].
///
/// Red always moves first, and a turn is counted as complete once Blue has replied to Red.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruleset {
    /// The turn on which the magic effects (zone freeze and double move) apply.
    pub special_turn: u32,
    /// Whether, on the special turn, Blue's living Magic piece freezes every Red piece standing in
    /// Blue's home half.
    pub zone_freeze: bool,
    /// Whether, on the special turn, Red's living Magic piece lets Red move the same piece twice
    /// if its first move starts and ends in Red's home half.
    pub double_move: bool,
}

impl Ruleset {
    /// Whether the given turn is the special turn.
    pub fn is_special_turn(&self, turn: u32) -> bool {
        turn == self.special_turn
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        crate::preset::rules::STANDARD
    }
}
