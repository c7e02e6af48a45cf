//! Legal-move generation and validation.
//!
//! Everything here is a pure function of a `Position` and the catalog.
//! The engine, the AI, and the tests all share these functions, so there is
//! exactly one definition of a legal turn.

use crate::board::Board;
use crate::cards::{Card, CardCatalog, CardId, Destinations};
use crate::core::{Coord, EngineError, EngineResult, Move, Player, Turn, BOARD_SIZE};

use super::position::Position;

/// Destinations for `player`'s piece on `from` with `card`.
///
/// Off-board squares and squares holding `player`'s own pieces are
/// excluded. Opposing pieces stay in the set; landing on one captures it.
#[must_use]
pub fn destinations(board: &Board, card: &Card, from: Coord, player: Player) -> Destinations {
    card.valid_moves(from, player, BOARD_SIZE)
        .into_iter()
        .filter(|&to| board.piece_at(to).map_or(true, |piece| piece.owner != player))
        .collect()
}

/// Every legal move of every piece of the player to move with `card`.
///
/// Empty if the player does not hold `card`.
pub fn moves_for_card(position: &Position, catalog: &CardCatalog, card: CardId) -> EngineResult<Vec<Move>> {
    let player = position.to_move;
    if !position.cards.holds(player, card) {
        return Ok(Vec::new());
    }
    let definition = catalog.card(card)?;

    let mut moves = Vec::new();
    for piece in position.board.player_pieces(player) {
        moves.extend(
            destinations(&position.board, definition, piece.coord, player)
                .into_iter()
                .map(|to| Move::new(piece.coord, to, card)),
        );
    }
    Ok(moves)
}

/// Every legal move of the piece on `from`, over both held cards.
///
/// Empty if `from` holds no piece of the player to move.
pub fn moves_from(position: &Position, catalog: &CardCatalog, from: Coord) -> EngineResult<Vec<Move>> {
    let player = position.to_move;
    if position.board.piece_at(from).map(|p| p.owner) != Some(player) {
        return Ok(Vec::new());
    }

    let mut moves = Vec::new();
    for card in position.cards.hand(player) {
        let definition = catalog.card(card)?;
        moves.extend(
            destinations(&position.board, definition, from, player)
                .into_iter()
                .map(|to| Move::new(from, to, card)),
        );
    }
    Ok(moves)
}

/// All legal moves for the player to move, grouped by hand slot.
pub fn legal_moves(position: &Position, catalog: &CardCatalog) -> EngineResult<Vec<Move>> {
    if position.is_terminal() {
        return Ok(Vec::new());
    }
    let mut moves = Vec::new();
    for card in position.cards.hand(position.to_move) {
        moves.extend(moves_for_card(position, catalog, card)?);
    }
    Ok(moves)
}

/// All legal turns: the legal moves, or one pass per held card when there
/// are none.
///
/// Empty only once the game is over.
pub fn legal_turns(position: &Position, catalog: &CardCatalog) -> EngineResult<Vec<Turn>> {
    if position.is_terminal() {
        return Ok(Vec::new());
    }
    let moves = legal_moves(position, catalog)?;
    if moves.is_empty() {
        return Ok(position.cards.hand(position.to_move).into_iter().map(Turn::Pass).collect());
    }
    Ok(moves.into_iter().map(Turn::Move).collect())
}

/// True if the player to move has at least one legal move.
pub fn has_legal_move(position: &Position, catalog: &CardCatalog) -> EngineResult<bool> {
    let player = position.to_move;
    for card in position.cards.hand(player) {
        let definition = catalog.card(card)?;
        let any = position
            .board
            .player_pieces(player)
            .any(|piece| !destinations(&position.board, definition, piece.coord, player).is_empty());
        if any {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check a move against every rule without applying it.
pub fn check_move(position: &Position, catalog: &CardCatalog, mv: Move) -> EngineResult<()> {
    let player = position.to_move;
    for square in [mv.from, mv.to] {
        if !square.is_on_board() {
            return Err(EngineError::OutOfBounds(square));
        }
    }

    let piece = position.board.piece_at(mv.from).ok_or(EngineError::EmptySquare(mv.from))?;
    if piece.owner != player {
        return Err(EngineError::NotYourPiece { square: mv.from, player });
    }

    let card = catalog.card(mv.card)?;
    if !position.cards.holds(player, mv.card) {
        return Err(EngineError::CardNotHeld {
            player,
            card: card.name().to_string(),
        });
    }

    let reachable = destinations(&position.board, card, mv.from, player);
    if !reachable.contains(&mv.to) {
        return Err(EngineError::IllegalDestination {
            from: mv.from,
            to: mv.to,
            card: card.name().to_string(),
        });
    }
    Ok(())
}

/// Check a turn against every rule without applying it.
pub fn check_turn(position: &Position, catalog: &CardCatalog, turn: Turn) -> EngineResult<()> {
    match turn {
        Turn::Move(mv) => check_move(position, catalog, mv),
        Turn::Pass(card) => {
            let player = position.to_move;
            let definition = catalog.card(card)?;
            if !position.cards.holds(player, card) {
                return Err(EngineError::CardNotHeld {
                    player,
                    card: definition.name().to_string(),
                });
            }
            if has_legal_move(position, catalog)? {
                return Err(EngineError::MustMove(player));
            }
            Ok(())
        }
    }
}
