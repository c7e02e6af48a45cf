//! Card definitions - immutable named movement patterns.
//!
//! Using a card never changes it. Only its possession (see `zones`) moves
//! between the players and the Center.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, EngineError, EngineResult, Offset, Player};

use super::pattern::Pattern;

/// Index of a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Destinations of one card from one square. Catalog cards have at most four.
pub type Destinations = SmallVec<[Coord; 4]>;

/// A movement card.
///
/// ## Orientation
///
/// Patterns are drawn from Player 1's seat. Player 2 sits across the table
/// and sees the card rotated by 180 degrees, so both offset components are
/// negated for Player 2.
///
/// ## Example
///
/// ```
/// use temple_cards::cards::{Card, Pattern};
/// use temple_cards::core::{Coord, Player};
///
/// let tiger = Card::new("Tiger", Pattern::from_steps(&[(0, 2), (0, -1)]).unwrap(), Player::Two).unwrap();
///
/// assert!(tiger.is_valid_move(Coord::new(4, 2), Coord::new(2, 2), Player::One));
/// assert!(tiger.is_valid_move(Coord::new(0, 2), Coord::new(2, 2), Player::Two));
/// assert_eq!(tiger.valid_moves(Coord::new(4, 2), Player::One, 5).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardData")]
pub struct Card {
    name: String,
    pattern: Pattern,
    /// Stamp colour. Decides the first player when the card starts in the Center.
    stamp: Player,
}

#[derive(Deserialize)]
struct CardData {
    name: String,
    pattern: Pattern,
    stamp: Player,
}

impl TryFrom<CardData> for Card {
    type Error = EngineError;

    fn try_from(data: CardData) -> Result<Self, Self::Error> {
        Card::new(data.name, data.pattern, data.stamp)
    }
}

impl Card {
    /// Create a card. Fails on an empty or padded name, or a pattern with no moves.
    pub fn new(name: impl Into<String>, pattern: Pattern, stamp: Player) -> EngineResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::InvalidCard("card name is empty".to_string()));
        }
        if name.trim() != name {
            return Err(EngineError::InvalidCard(format!(
                "card name {name:?} has surrounding whitespace"
            )));
        }
        if name.contains('|') {
            return Err(EngineError::InvalidCard(format!("card name {name:?} contains '|'")));
        }
        if pattern.is_empty() {
            return Err(EngineError::InvalidCard(format!("card {name} has no moves")));
        }
        Ok(Self { name, pattern, stamp })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn stamp(&self) -> Player {
        self.stamp
    }

    /// Offsets this card grants to `player`, in board coordinates.
    pub fn offsets_for(&self, player: Player) -> impl Iterator<Item = Offset> + '_ {
        self.pattern.offsets().map(move |offset| match player {
            Player::One => offset,
            Player::Two => offset.rotated(),
        })
    }

    /// Every destination reachable from `from` for `player`, clipped to a
    /// board of `board_size`. Off-board destinations are dropped silently.
    ///
    /// Occupancy is not considered here; see `rules::destinations`.
    #[must_use]
    pub fn valid_moves(&self, from: Coord, player: Player, board_size: i8) -> Destinations {
        self.offsets_for(player)
            .filter_map(|offset| from.offset(offset))
            .filter(|to| to.in_bounds(board_size))
            .collect()
    }

    /// True if `from -> to` matches a marked offset for `player`.
    #[must_use]
    pub fn is_valid_move(&self, from: Coord, to: Coord, player: Player) -> bool {
        let Some(delta) = from.delta_to(to) else {
            return false;
        };
        let delta = match player {
            Player::One => delta,
            Player::Two => delta.rotated(),
        };
        self.pattern.contains(delta)
    }

    /// Compact text form: `Name|stamp|r0/r1/r2/r3/r4`.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}|{}|{}", self.name, self.stamp.number(), self.pattern.encode())
    }
}

impl std::str::FromStr for Card {
    type Err = EngineError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.trim().split('|');
        let (Some(name), Some(stamp), Some(pattern), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(EngineError::InvalidCard(format!("expected Name|stamp|pattern, got {text:?}")));
        };

        let stamp = stamp
            .parse::<u8>()
            .ok()
            .and_then(Player::from_number)
            .ok_or_else(|| EngineError::InvalidCard(format!("bad stamp {stamp:?}")))?;
        let pattern = Pattern::parse(pattern)?;
        Card::new(name, pattern, stamp)
    }
}
