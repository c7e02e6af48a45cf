//! Engine configuration.
//!
//! Hosts build an `EngineConfig` explicitly and hand it to `GameEngine`;
//! the engine reads no environment and keeps no global state.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::ai::Difficulty;

/// Default seed for deals and AI tie-breaks.
pub const DEFAULT_SEED: u64 = 0x7E3A_91C5;

/// Computer opponent seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    /// Seat the AI plays.
    pub player: Player,
    pub difficulty: Difficulty,
}

impl AiSettings {
    #[must_use]
    pub const fn new(player: Player, difficulty: Difficulty) -> Self {
        Self { player, difficulty }
    }
}

/// Engine configuration.
///
/// ## Example
///
/// ```
/// use temple_cards::ai::Difficulty;
/// use temple_cards::core::{EngineConfig, Player};
///
/// let config = EngineConfig::new()
///     .with_seed(7)
///     .with_ai_opponent(Player::Two, Difficulty::Hard)
///     .with_max_turns(200);
///
/// assert_eq!(config.seed, 7);
/// assert!(config.is_ai(Player::Two));
/// assert!(!config.is_ai(Player::One));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for deal shuffles and AI randomness.
    pub seed: u64,

    /// Single-player AI opponent. `None` for hot-seat play.
    pub ai: Option<AiSettings>,

    /// Turn cap hosts may use to abandon games that cycle. The engine
    /// itself never ends a game on this.
    pub max_turns: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ai: None,
            max_turns: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Let the AI play `player` at `difficulty`.
    #[must_use]
    pub fn with_ai_opponent(mut self, player: Player, difficulty: Difficulty) -> Self {
        self.ai = Some(AiSettings::new(player, difficulty));
        self
    }

    #[must_use]
    pub fn without_ai(mut self) -> Self {
        self.ai = None;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// True if `player` is controlled by the AI.
    #[must_use]
    pub fn is_ai(&self, player: Player) -> bool {
        self.ai.is_some_and(|ai| ai.player == player)
    }
}
