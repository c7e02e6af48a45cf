//! Custom starting positions.
//!
//! A `GameSetup` describes how a game begins: the board, optionally the
//! exact cards in each hand and the Center, and optionally who moves
//! first. Anything left unspecified falls back to the normal rules (random
//! deal, Center stamp decides the first player).

use crate::board::Board;
use crate::cards::CardCatalog;
use crate::core::{EngineResult, GameRng, Player, PlayerMap};
use crate::rules::Position;
use crate::zones::CardPossession;

/// Card names for an explicit deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealSpec {
    pub hands: PlayerMap<[String; 2]>,
    pub center: String,
}

/// Starting position description.
///
/// ## Example
///
/// ```
/// use temple_cards::board::Board;
/// use temple_cards::core::Player;
/// use temple_cards::engine::{GameEngine, GameSetup};
///
/// let setup = GameSetup::new(Board::new())
///     .with_cards(["Tiger", "Ox"], ["Boar", "Eel"], "Crab")
///     .with_first_player(Player::One);
///
/// let mut engine = GameEngine::new();
/// engine.start_with(setup).unwrap();
/// assert_eq!(engine.center_card().map(|c| c.name()), Some("Crab"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameSetup {
    pub board: Board,
    pub deal: Option<DealSpec>,
    pub first_player: Option<Player>,
}

impl GameSetup {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            deal: None,
            first_player: None,
        }
    }

    /// Standard layout, random deal.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Board::new())
    }

    #[must_use]
    pub fn with_cards(mut self, player_one: [&str; 2], player_two: [&str; 2], center: &str) -> Self {
        let hands = PlayerMap::new(|player| match player {
            Player::One => player_one.map(str::to_string),
            Player::Two => player_two.map(str::to_string),
        });
        self.deal = Some(DealSpec {
            hands,
            center: center.to_string(),
        });
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = Some(player);
        self
    }

    /// Build and validate the starting position.
    ///
    /// Consumes randomness only when the deal is left to chance.
    pub fn build(self, catalog: &CardCatalog, rng: &mut GameRng) -> EngineResult<Position> {
        let cards = match &self.deal {
            Some(deal) => {
                let resolve = |names: &[String; 2]| -> EngineResult<[_; 2]> {
                    Ok([catalog.resolve(&names[0])?, catalog.resolve(&names[1])?])
                };
                let mut hands = PlayerMap::with_value(resolve(&deal.hands[Player::One])?);
                hands[Player::Two] = resolve(&deal.hands[Player::Two])?;
                CardPossession::new(hands, catalog.resolve(&deal.center)?)?
            }
            None => CardPossession::deal(catalog, rng)?,
        };
        let first = match self.first_player {
            Some(player) => player,
            None => cards.starting_player(catalog)?,
        };

        let position = Position::new(self.board, cards, first);
        position.validate(catalog)?;
        Ok(position)
    }
}
