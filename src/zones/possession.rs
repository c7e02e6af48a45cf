//! Card possession: who holds each of the five cards in play.
//!
//! Each player holds exactly two cards and the Center holds exactly one.
//! The only way a card changes hands is an exchange: the card a player uses
//! goes to the Center, and the previous Center card joins that player's hand
//! in the same slot.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId};
use crate::core::{EngineError, EngineResult, GameRng, Player, PlayerMap};

/// Cards per hand.
pub const HAND_SIZE: usize = 2;

/// Cards in play: two hands plus the Center.
pub const CARDS_IN_PLAY: usize = 2 * HAND_SIZE + 1;

/// Where a card in play currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holder {
    Player(Player),
    Center,
}

/// The 2+2+1 card distribution.
///
/// ## Example
///
/// ```
/// use temple_cards::cards::CardId;
/// use temple_cards::core::Player;
/// use temple_cards::zones::{CardPossession, Holder};
///
/// let ids = [0, 1, 2, 3, 4].map(CardId::new);
/// let mut cards = CardPossession::from_deal(ids).unwrap();
///
/// let received = cards.exchange(Player::One, CardId::new(1)).unwrap();
/// assert_eq!(received, CardId::new(4));
/// assert_eq!(cards.center(), CardId::new(1));
/// assert_eq!(cards.holder_of(CardId::new(4)), Some(Holder::Player(Player::One)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardPossession {
    hands: PlayerMap<[CardId; HAND_SIZE]>,
    center: CardId,
}

impl CardPossession {
    /// Build from explicit hands. All five cards must be distinct.
    pub fn new(hands: PlayerMap<[CardId; HAND_SIZE]>, center: CardId) -> EngineResult<Self> {
        let possession = Self { hands, center };
        possession.check_distinct()?;
        Ok(possession)
    }

    /// Split five dealt cards: two to Player 1, two to Player 2, one to the Center.
    pub fn from_deal(cards: [CardId; CARDS_IN_PLAY]) -> EngineResult<Self> {
        let [a, b, c, d, center] = cards;
        let mut hands = PlayerMap::with_value([a, b]);
        hands[Player::Two] = [c, d];
        Self::new(hands, center)
    }

    /// Shuffle the catalog and deal the first five cards.
    pub fn deal(catalog: &CardCatalog, rng: &mut GameRng) -> EngineResult<Self> {
        let mut ids: Vec<CardId> = catalog.ids().collect();
        rng.shuffle(&mut ids);
        Self::from_deal(Self::first_five(&ids)?)
    }

    /// Cards 0 to 4 dealt in order. Same as `default_deal` for any catalog
    /// of at least five cards.
    pub(crate) fn opening() -> Self {
        let mut hands = PlayerMap::with_value([CardId::new(0), CardId::new(1)]);
        hands[Player::Two] = [CardId::new(2), CardId::new(3)];
        Self {
            hands,
            center: CardId::new(4),
        }
    }

    /// Unshuffled deal of the first five catalog cards.
    pub fn default_deal(catalog: &CardCatalog) -> EngineResult<Self> {
        let ids: Vec<CardId> = catalog.ids().take(CARDS_IN_PLAY).collect();
        Self::from_deal(Self::first_five(&ids)?)
    }

    fn first_five(ids: &[CardId]) -> EngineResult<[CardId; CARDS_IN_PLAY]> {
        ids.get(..CARDS_IN_PLAY)
            .and_then(|slice| <[CardId; CARDS_IN_PLAY]>::try_from(slice).ok())
            .ok_or_else(|| {
                EngineError::InvalidDeal(format!(
                    "need {CARDS_IN_PLAY} cards, catalog has {}",
                    ids.len()
                ))
            })
    }

    // === Queries ===

    #[must_use]
    pub fn hand(&self, player: Player) -> [CardId; HAND_SIZE] {
        self.hands[player]
    }

    #[must_use]
    pub fn center(&self) -> CardId {
        self.center
    }

    #[must_use]
    pub fn holds(&self, player: Player, card: CardId) -> bool {
        self.hands[player].contains(&card)
    }

    /// Where `card` sits, or `None` if it is not in play.
    #[must_use]
    pub fn holder_of(&self, card: CardId) -> Option<Holder> {
        if card == self.center {
            return Some(Holder::Center);
        }
        Player::ALL
            .into_iter()
            .find(|&player| self.holds(player, card))
            .map(Holder::Player)
    }

    /// All five cards: Player 1's hand, Player 2's hand, then the Center.
    #[must_use]
    pub fn cards(&self) -> [CardId; CARDS_IN_PLAY] {
        let [a, b] = self.hands[Player::One];
        let [c, d] = self.hands[Player::Two];
        [a, b, c, d, self.center]
    }

    // === Exchange ===

    /// Send `used` from `player`'s hand to the Center and return the card
    /// the player received in its place. Fails without change if the
    /// player does not hold `used`.
    pub fn exchange(&mut self, player: Player, used: CardId) -> EngineResult<CardId> {
        let slot = self.hands[player]
            .iter()
            .position(|&card| card == used)
            .ok_or_else(|| EngineError::CardNotHeld {
                player,
                card: used.to_string(),
            })?;

        let received = std::mem::replace(&mut self.center, used);
        self.hands[player][slot] = received;
        debug_assert_eq!(self.check_distinct(), Ok(()));
        Ok(received)
    }

    // === Validation ===

    /// Check that all five cards are distinct and registered in `catalog`.
    pub fn validate(&self, catalog: &CardCatalog) -> EngineResult<()> {
        self.check_distinct()?;
        match self.cards().into_iter().find(|&card| !catalog.contains(card)) {
            Some(card) => Err(EngineError::UnknownCard(card.to_string())),
            None => Ok(()),
        }
    }

    fn check_distinct(&self) -> EngineResult<()> {
        let mut cards = self.cards();
        cards.sort_unstable();
        if cards.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(EngineError::InvalidDeal(format!("cards in play are not distinct: {cards:?}")));
        }
        Ok(())
    }

    /// Player who moves first: the stamp of the Center card.
    pub fn starting_player(&self, catalog: &CardCatalog) -> EngineResult<Player> {
        Ok(catalog.card(self.center)?.stamp())
    }
}
