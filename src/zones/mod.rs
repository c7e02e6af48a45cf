//! Card possession zones.
//!
//! The five cards in play live in three zones: each player's hand and the
//! Center. There is no deck or discard; cards only move by exchange.
//!
//! ## Key Types
//!
//! - `Holder`: Player 1, Player 2, or the Center
//! - `CardPossession`: the 2+2+1 distribution and the exchange rule

pub mod possession;

pub use possession::{CardPossession, Holder, CARDS_IN_PLAY, HAND_SIZE};
