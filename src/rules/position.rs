//! Position snapshot: board, card possession, and side to move.
//!
//! A `Position` is everything the rules need to decide legality. The engine
//! owns one and commits turns through `apply_turn`; the AI clones it freely
//! to search ahead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Piece};
use crate::cards::CardCatalog;
use crate::core::{EngineError, EngineResult, GameStatus, MoveOutcome, Player, Turn, VictoryCondition};
use crate::zones::CardPossession;

use super::moves::check_turn;
use super::victory::victory_after;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Player,
    pub condition: VictoryCondition,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        self.winner == player
    }
}

/// Board, cards, and the player to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub cards: CardPossession,
    pub to_move: Player,
    /// Set once a turn wins the game. No further turns apply.
    pub result: Option<GameResult>,
}

impl Position {
    #[must_use]
    pub fn new(board: Board, cards: CardPossession, to_move: Player) -> Self {
        Self {
            board,
            cards,
            to_move,
            result: None,
        }
    }

    /// Standard layout with the given cards; the Center card's stamp moves first.
    pub fn standard(cards: CardPossession, catalog: &CardCatalog) -> EngineResult<Self> {
        let first = cards.starting_player(catalog)?;
        Ok(Self::new(Board::new(), cards, first))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// Check the invariants of a playable position.
    ///
    /// Board consistency, five distinct catalog cards, one Master per
    /// player, and no Master already standing on the opposing temple.
    pub fn validate(&self, catalog: &CardCatalog) -> EngineResult<()> {
        self.board.validate().map_err(|err| EngineError::InvalidSetup(err.to_string()))?;
        self.cards.validate(catalog)?;

        for player in Player::ALL {
            let master = self
                .board
                .find_master(player)
                .ok_or_else(|| EngineError::InvalidSetup(format!("{player} has no Master")))?;
            if self.board.temple_owner(master) == Some(player.opponent()) {
                return Err(EngineError::InvalidSetup(format!(
                    "{player}'s Master already stands on the opposing temple"
                )));
            }
        }
        Ok(())
    }

    /// Validate and commit `turn` for the player to move.
    ///
    /// On error nothing changes. On success the used card is exchanged with
    /// the Center, victory is checked, and the turn passes to the opponent
    /// unless the game ended.
    pub fn apply_turn(&mut self, catalog: &CardCatalog, turn: Turn) -> EngineResult<MoveOutcome> {
        if self.is_terminal() {
            return Err(EngineError::InvalidStatus(GameStatus::GameOver));
        }
        check_turn(self, catalog, turn)?;

        let mover = self.to_move;
        let captured: Option<Piece> = match turn {
            Turn::Move(mv) => self.board.move_piece(mv.from, mv.to)?,
            Turn::Pass(_) => None,
        };
        self.cards.exchange(mover, turn.card())?;

        let victory = match turn {
            Turn::Move(_) => victory_after(&self.board, mover),
            Turn::Pass(_) => None,
        };
        match victory {
            Some(condition) => {
                self.result = Some(GameResult { winner: mover, condition });
                debug!(%mover, ?condition, "game won");
            }
            None => self.to_move = mover.opponent(),
        }

        Ok(MoveOutcome {
            mover,
            turn,
            captured,
            victory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;
    use crate::cards::CardId;
    use crate::core::{Coord, Move, PlayerMap};

    fn possession(catalog: &CardCatalog, p1: [&str; 2], p2: [&str; 2], center: &str) -> CardPossession {
        let id = |name: &str| catalog.by_name(name).unwrap();
        let hands = PlayerMap::new(|p| match p {
            Player::One => p1.map(id),
            Player::Two => p2.map(id),
        });
        CardPossession::new(hands, id(center)).unwrap()
    }

    fn card(catalog: &CardCatalog, name: &str) -> CardId {
        catalog.by_name(name).unwrap()
    }

    #[test]
    fn test_standard_first_player_from_center() {
        let catalog = CardCatalog::standard();
        let cards = possession(&catalog, ["Tiger", "Crab"], ["Boar", "Ox"], "Eel");
        let position = Position::standard(cards, &catalog).unwrap();
        assert_eq!(position.to_move, Player::One);
        assert!(position.validate(&catalog).is_ok());

        let cards = possession(&catalog, ["Tiger", "Crab"], ["Boar", "Ox"], "Cobra");
        let position = Position::standard(cards, &catalog).unwrap();
        assert_eq!(position.to_move, Player::Two);
    }

    #[test]
    fn test_apply_move_exchanges_and_flips() {
        let catalog = CardCatalog::standard();
        let cards = possession(&catalog, ["Tiger", "Ox"], ["Boar", "Eel"], "Crab");
        let mut position = Position::new(Board::new(), cards, Player::One);
        let tiger = card(&catalog, "Tiger");

        let outcome = position
            .apply_turn(&catalog, Turn::Move(Move::new(Coord::new(4, 0), Coord::new(2, 0), tiger)))
            .unwrap();

        assert_eq!(outcome.mover, Player::One);
        assert!(outcome.captured.is_none());
        assert!(outcome.victory.is_none());
        assert_eq!(position.to_move, Player::Two);
        assert_eq!(position.cards.center(), tiger);
        assert!(position.cards.holds(Player::One, card(&catalog, "Crab")));
        assert!(position.board.is_empty(Coord::new(4, 0)));
    }

    #[test]
    fn test_rejected_turn_leaves_position() {
        let catalog = CardCatalog::standard();
        let cards = possession(&catalog, ["Tiger", "Ox"], ["Boar", "Eel"], "Crab");
        let mut position = Position::new(Board::new(), cards, Player::One);
        let before = position.clone();

        let bad = Move::new(Coord::new(4, 0), Coord::new(3, 1), card(&catalog, "Tiger"));
        assert!(position.apply_turn(&catalog, Turn::Move(bad)).is_err());
        assert_eq!(position, before);
    }

    #[test]
    fn test_master_capture_wins() {
        let catalog = CardCatalog::standard();
        let mut board = Board::empty();
        board.place_piece(PieceKind::Master, Player::One, Coord::new(2, 2)).unwrap();
        board.place_piece(PieceKind::Master, Player::Two, Coord::new(0, 2)).unwrap();
        let cards = possession(&catalog, ["Tiger", "Ox"], ["Boar", "Eel"], "Crab");
        let mut position = Position::new(board, cards, Player::One);

        let outcome = position
            .apply_turn(&catalog, Turn::Move(Move::new(Coord::new(2, 2), Coord::new(0, 2), card(&catalog, "Tiger"))))
            .unwrap();

        // Captured on the temple square too; capture is reported first.
        assert_eq!(outcome.victory, Some(VictoryCondition::MasterCapture));
        assert!(outcome.captured.is_some_and(|p| p.is_master()));
        assert_eq!(
            position.result,
            Some(GameResult {
                winner: Player::One,
                condition: VictoryCondition::MasterCapture
            })
        );
        assert_eq!(position.to_move, Player::One);
        assert!(position.is_terminal());

        let next = Turn::Pass(card(&catalog, "Ox"));
        assert!(position.apply_turn(&catalog, next).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_setups() {
        let catalog = CardCatalog::standard();
        let cards = possession(&catalog, ["Tiger", "Ox"], ["Boar", "Eel"], "Crab");

        let mut board = Board::empty();
        board.place_piece(PieceKind::Master, Player::One, Coord::new(4, 2)).unwrap();
        let position = Position::new(board, cards, Player::One);
        assert!(matches!(position.validate(&catalog), Err(EngineError::InvalidSetup(_))));

        let mut board = Board::empty();
        board.place_piece(PieceKind::Master, Player::One, Coord::new(0, 2)).unwrap();
        board.place_piece(PieceKind::Master, Player::Two, Coord::new(2, 2)).unwrap();
        let position = Position::new(board, cards, Player::One);
        assert!(matches!(position.validate(&catalog), Err(EngineError::InvalidSetup(_))));
    }
}
