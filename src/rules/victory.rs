//! Victory detection.

use crate::board::Board;
use crate::core::{Player, VictoryCondition};

/// Victory earned by `mover`'s last move, if any.
///
/// Master capture is checked first, so a move that takes the Master on its
/// temple square counts as a capture.
#[must_use]
pub fn victory_after(board: &Board, mover: Player) -> Option<VictoryCondition> {
    let opponent = mover.opponent();
    if board.find_master(opponent).is_none() {
        return Some(VictoryCondition::MasterCapture);
    }
    if board.find_master(mover) == Some(opponent.home_temple()) {
        return Some(VictoryCondition::TempleVictory);
    }
    None
}
