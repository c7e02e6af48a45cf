//! The game engine and everything a host drives it through.
//!
//! ## Key Types
//!
//! - `GameEngine`: lifecycle state machine, selection, turn commits, AI turns
//! - `GameSetup`: custom starting positions (board, deal, first player)
//! - `GameStats`: aggregate results across completed games
//! - `SaveGame`: versioned save record with full validation on load
//!
//! The engine is single-threaded and owns all mutable game state. Hosts
//! read it through query methods and change it only through commands.

pub mod game;
pub mod save;
pub mod setup;
pub mod stats;

pub use game::GameEngine;
pub use save::{SaveGame, SAVE_VERSION};
pub use setup::{DealSpec, GameSetup};
pub use stats::GameStats;
