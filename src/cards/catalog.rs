//! Card catalog.
//!
//! The `CardCatalog` owns every card definition for a process and hands out
//! stable `CardId`s in registration order. `CardCatalog::standard()` builds
//! the fixed sixteen-card set; the order never changes between runs, so a
//! seeded deal always produces the same hands.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, EngineResult, Player};

use super::definition::{Card, CardId};
use super::pattern::Pattern;

/// Standard movement tables as `(right, forward)` steps from Player 1's seat.
const STANDARD_CARDS: [(&str, &[(i8, i8)], Player); 16] = [
    ("Boar", &[(0, 1), (-1, 0), (1, 0)], Player::Two),
    ("Cobra", &[(-1, 0), (1, 1), (1, -1)], Player::Two),
    ("Crab", &[(0, 1), (-2, 0), (2, 0)], Player::One),
    ("Crane", &[(0, 1), (-1, -1), (1, -1)], Player::One),
    ("Dragon", &[(-2, 1), (2, 1), (-1, -1), (1, -1)], Player::Two),
    ("Eel", &[(-1, 1), (-1, -1), (1, 0)], Player::One),
    ("Elephant", &[(-1, 1), (1, 1), (-1, 0), (1, 0)], Player::Two),
    ("Frog", &[(-2, 0), (-1, 1), (1, -1)], Player::Two),
    ("Goose", &[(-1, 1), (-1, 0), (1, 0), (1, -1)], Player::One),
    ("Horse", &[(0, 1), (-1, 0), (0, -1)], Player::Two),
    ("Mantis", &[(-1, 1), (1, 1), (0, -1)], Player::Two),
    ("Monkey", &[(-1, 1), (1, 1), (-1, -1), (1, -1)], Player::One),
    ("Ox", &[(0, 1), (1, 0), (0, -1)], Player::One),
    ("Rabbit", &[(2, 0), (1, 1), (-1, -1)], Player::One),
    ("Rooster", &[(1, 1), (1, 0), (-1, 0), (-1, -1)], Player::Two),
    ("Tiger", &[(0, 2), (0, -1)], Player::One),
];

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use temple_cards::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.len(), 16);
///
/// let tiger = catalog.by_name("Tiger").unwrap();
/// assert_eq!(catalog.get(tiger).unwrap().name(), "Tiger");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed sixteen-card set, alphabetically ordered.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (name, steps, stamp) in STANDARD_CARDS {
            let card = Pattern::from_steps(steps).and_then(|pattern| Card::new(name, pattern, stamp));
            if let Err(err) = card.and_then(|card| catalog.register(card)) {
                debug_assert!(false, "standard card {name} rejected: {err}");
            }
        }
        catalog
    }

    /// Register a card and return its id.
    ///
    /// Names are unique; a second card with the same name is rejected.
    pub fn register(&mut self, card: Card) -> EngineResult<CardId> {
        if self.by_name.contains_key(card.name()) {
            return Err(EngineError::DuplicateCard(card.name().to_string()));
        }
        let index = u8::try_from(self.cards.len())
            .map_err(|_| EngineError::InvalidCard("catalog is full".to_string()))?;
        let id = CardId::new(index);
        self.by_name.insert(card.name().to_string(), id);
        self.cards.push(card);
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Look up a card, reporting an unknown id as an error.
    pub fn card(&self, id: CardId) -> EngineResult<&Card> {
        self.get(id).ok_or_else(|| EngineError::UnknownCard(id.to_string()))
    }

    /// Find a card id by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Find a card id by name, reporting an unknown name as an error.
    pub fn resolve(&self, name: &str) -> EngineResult<CardId> {
        self.by_name(name).ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Card name, or `"?"` for ids outside the catalog.
    #[must_use]
    pub fn name_of(&self, id: CardId) -> &str {
        self.get(id).map_or("?", Card::name)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..self.cards.len()).map(|i| CardId::new(i as u8))
    }

    /// Iterate over `(id, card)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards.iter().enumerate().map(|(i, card)| (CardId::new(i as u8), card))
    }
}
