//! Game rules: legal-move generation, turn application, victory detection.
//!
//! ## Key Types
//!
//! - `Position`: board + card possession + side to move
//! - `GameResult`: winner and how the game was won
//!
//! All functions are deterministic and side-effect free apart from
//! `Position::apply_turn`, which validates before it mutates.

pub mod moves;
pub mod position;
pub mod victory;

pub use moves::{
    check_move, check_turn, destinations, has_legal_move, legal_moves, legal_turns, moves_for_card, moves_from,
};
pub use position::{GameResult, Position};
pub use victory::victory_after;
