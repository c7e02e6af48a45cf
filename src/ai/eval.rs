//! Static position evaluation.
//!
//! Scores are from one player's point of view; positive is good for that
//! player. A decided game dominates every other term.

use crate::cards::CardCatalog;
use crate::core::{Coord, Player};
use crate::rules::{destinations, Position};

/// Score of a won game. Search adjusts it by ply so faster wins rank higher.
pub const WIN_SCORE: i32 = 100_000;

const MONK_VALUE: i32 = 100;
const MASTER_THREAT: i32 = 250;
const TEMPLE_STEP: i32 = 15;
const MOBILITY: i32 = 2;

/// Every square `player` could move a piece to with the cards now in hand.
/// Duplicates are kept: each entry is one distinct (piece, card) move.
#[must_use]
pub fn reachable(position: &Position, catalog: &CardCatalog, player: Player) -> Vec<Coord> {
    let mut squares = Vec::new();
    for card in position.cards.hand(player) {
        let Some(definition) = catalog.get(card) else {
            continue;
        };
        for piece in position.board.player_pieces(player) {
            squares.extend(destinations(&position.board, definition, piece.coord, player));
        }
    }
    squares
}

/// True if `attacker` can move onto `target` with a card in hand.
#[must_use]
pub fn attacks(position: &Position, catalog: &CardCatalog, attacker: Player, target: Coord) -> bool {
    reachable(position, catalog, attacker).contains(&target)
}

/// Evaluate `position` for `player`.
#[must_use]
pub fn evaluate(position: &Position, catalog: &CardCatalog, player: Player) -> i32 {
    if let Some(result) = position.result {
        return if result.is_winner(player) { WIN_SCORE } else { -WIN_SCORE };
    }
    let opponent = player.opponent();
    let board = &position.board;

    let monks = |p: Player| board.piece_count(p) as i32 - i32::from(board.find_master(p).is_some());
    let material = (monks(player) - monks(opponent)) * MONK_VALUE;

    let own_reach = reachable(position, catalog, player);
    let their_reach = reachable(position, catalog, opponent);
    let mobility = (own_reach.len() as i32 - their_reach.len() as i32) * MOBILITY;

    // A threat matters twice as much when its owner moves next.
    let urgency = |attacker: Player| if position.to_move == attacker { 2 } else { 1 };
    let mut safety = 0;
    if let Some(master) = board.find_master(player) {
        if their_reach.contains(&master) {
            safety -= MASTER_THREAT * urgency(opponent);
        }
    }
    if let Some(master) = board.find_master(opponent) {
        if own_reach.contains(&master) {
            safety += MASTER_THREAT * urgency(player);
        }
    }

    let proximity = |p: Player| {
        board
            .find_master(p)
            .map_or(0, |m| (4 - i32::from(m.distance(p.opponent().home_temple()))) * TEMPLE_STEP)
    };
    let temple = proximity(player) - proximity(opponent);

    material + safety + temple + mobility
}
