//! Core engine types: players, coordinates, state, turns, RNG, configuration.
//!
//! These are the building blocks every other module shares. Nothing here
//! knows the rules of movement; that lives in `cards` and `rules`.

pub mod action;
pub mod config;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveOutcome, Turn, TurnRecord};
pub use config::{AiSettings, EngineConfig, DEFAULT_SEED};
pub use coord::{Coord, Offset, BOARD_SIZE};
pub use error::{EngineError, EngineResult};
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStatus, LegalDestinations, Selection, VictoryCondition};
