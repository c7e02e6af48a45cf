//! Turn representation.
//!
//! A turn is either a move (piece, destination, card) or a forced pass that
//! only nominates the card to exchange. Both carry a `CardId` because both
//! send that card to the Center.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::player::Player;
use super::state::VictoryCondition;
use crate::board::Piece;
use crate::cards::CardId;

/// Move a piece from `from` to `to` using `card`.
///
/// ## Example
///
/// ```
/// use temple_cards::cards::CardId;
/// use temple_cards::core::{Coord, Move, Turn};
///
/// let mv = Move::new(Coord::new(4, 2), Coord::new(2, 2), CardId::new(15));
/// let turn = Turn::from(mv);
///
/// assert_eq!(turn.card(), CardId::new(15));
/// assert_eq!(turn.as_move(), Some(mv));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub card: CardId,
}

impl Move {
    #[must_use]
    pub const fn new(from: Coord, to: Coord, card: CardId) -> Self {
        Self { from, to, card }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} with {}", self.from, self.to, self.card)
    }
}

/// One player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Turn {
    Move(Move),
    /// Forced pass. Only legal when no piece can move with either card.
    Pass(CardId),
}

impl Turn {
    /// Card sent to the Center by this turn.
    #[must_use]
    pub const fn card(&self) -> CardId {
        match self {
            Turn::Move(mv) => mv.card,
            Turn::Pass(card) => *card,
        }
    }

    #[must_use]
    pub const fn as_move(&self) -> Option<Move> {
        match self {
            Turn::Move(mv) => Some(*mv),
            Turn::Pass(_) => None,
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Turn::Pass(_))
    }
}

impl From<Move> for Turn {
    fn from(mv: Move) -> Self {
        Turn::Move(mv)
    }
}

/// What a committed turn did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Player who took the turn.
    pub mover: Player,

    /// The turn as committed.
    pub turn: Turn,

    /// Opponent piece removed by the move, if any.
    pub captured: Option<Piece>,

    /// Set when the turn ended the game. The mover is the winner.
    pub victory: Option<VictoryCondition>,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.victory.is_some()
    }
}

/// A committed turn with its position in the game, kept as history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: Player,
    pub turn: Turn,
    /// Zero-based index of the turn within its game.
    pub index: u32,
}

impl TurnRecord {
    #[must_use]
    pub const fn new(player: Player, turn: Turn, index: u32) -> Self {
        Self { player, turn, index }
    }
}
