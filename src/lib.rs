//! # temple-cards
//!
//! Rules engine and AI for a two-player strategy game on a 5x5 board.
//! Each player has a Master and four Monks; movement comes from five
//! shared cards that change hands every turn.
//!
//! ## Rules in brief
//!
//! - Each player holds two cards; a fifth waits in the Center.
//! - A turn moves one own piece by one offset of a held card, then swaps
//!   that card with the Center card.
//! - Offsets are written from Player 1's seat; Player 2 uses them rotated
//!   by 180 degrees.
//! - Capturing the enemy Master, or moving your Master onto the enemy's
//!   home temple, wins.
//! - A player with no legal move must pass, still exchanging a card.
//!
//! ## Modules
//!
//! - `core`: coordinates, players, turns, state, errors, RNG, configuration
//! - `board`: the 5x5 board and its pieces
//! - `cards`: movement patterns, card definitions, the card catalog
//! - `zones`: which player holds which card
//! - `rules`: legal-move generation, turn application, victory detection
//! - `engine`: the stateful `GameEngine`, setups, statistics, saves
//! - `ai`: difficulty-scaled turn selection
//!
//! ```
//! use temple_cards::{Difficulty, EngineConfig, GameEngine, GameStatus, Player};
//!
//! let config = EngineConfig::new().with_seed(7).with_ai_opponent(Player::Two, Difficulty::Easy);
//! let mut engine = GameEngine::with_config(config);
//! engine.start_new_game().unwrap();
//!
//! if !engine.is_ai_turn() {
//!     let turn = engine.legal_turns().unwrap()[0];
//!     engine.commit_turn(turn).unwrap();
//! }
//! engine.tick(std::time::Duration::from_millis(16)).unwrap();
//! assert_eq!(engine.status(), GameStatus::Playing);
//! ```

pub mod ai;
pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod rules;
pub mod zones;

pub use crate::ai::{select_turn, AiChoice, AiConfig, Difficulty};
pub use crate::board::{Board, Piece, PieceKind};
pub use crate::cards::{Card, CardCatalog, CardId, Pattern};
pub use crate::core::{
    Coord, EngineConfig, EngineError, EngineResult, GameRng, GameState, GameStatus, Move, MoveOutcome, Player,
    Turn, VictoryCondition,
};
pub use crate::engine::{GameEngine, GameSetup, GameStats, SaveGame};
pub use crate::rules::Position;
pub use crate::zones::CardPossession;
