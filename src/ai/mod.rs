//! AI move selection.
//!
//! ## Key Types
//!
//! - `Difficulty`: Easy / Medium / Hard (levels 1-3)
//! - `AiConfig`: search parameters derived from a difficulty
//! - `TurnPolicy`: pluggable turn selection (`RandomPolicy`, `GreedyPolicy`, `SearchPolicy`)
//! - `SearchStats`: work done by one query
//!
//! `select_turn` is a pure function of a position snapshot, the catalog, a
//! config, and an RNG. It holds no state between calls, and the turn it
//! returns is always a member of `rules::legal_turns`.
//!
//! ```
//! use temple_cards::ai::{select_turn, AiConfig, Difficulty};
//! use temple_cards::cards::CardCatalog;
//! use temple_cards::core::GameRng;
//! use temple_cards::rules::{legal_turns, Position};
//! use temple_cards::zones::CardPossession;
//!
//! let catalog = CardCatalog::standard();
//! let mut rng = GameRng::new(1);
//! let cards = CardPossession::deal(&catalog, &mut rng).unwrap();
//! let position = Position::standard(cards, &catalog).unwrap();
//!
//! let choice = select_turn(&position, &catalog, &AiConfig::from_difficulty(Difficulty::Medium), &mut rng).unwrap();
//! assert!(legal_turns(&position, &catalog).unwrap().contains(&choice.turn));
//! ```

pub mod config;
pub mod eval;
pub mod policy;
pub mod search;
pub mod stats;

pub use config::{AiConfig, Difficulty, ParseDifficultyError, SearchKind};
pub use eval::{evaluate, WIN_SCORE};
pub use policy::{GreedyPolicy, RandomPolicy, SearchPolicy, TurnPolicy};
pub use search::AlphaBeta;
pub use stats::SearchStats;

use std::time::Instant;

use tracing::trace;

use crate::cards::CardCatalog;
use crate::core::{EngineError, EngineResult, GameRng, GameStatus, Turn};
use crate::rules::Position;

/// A selected turn with its score and the work it took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiChoice {
    pub turn: Turn,
    /// Score from the mover's point of view (0 for random play).
    pub score: i32,
    pub stats: SearchStats,
}

/// Policy implementing a search kind.
#[must_use]
pub fn policy_for(kind: SearchKind) -> &'static dyn TurnPolicy {
    match kind {
        SearchKind::Random => &RandomPolicy,
        SearchKind::Greedy => &GreedyPolicy,
        SearchKind::AlphaBeta => &SearchPolicy,
    }
}

/// Choose a turn for the player to move.
///
/// Fails with `InvalidStatus(GameOver)` once the position is decided. When
/// no piece can move, the result is a forced pass.
pub fn select_turn(
    position: &Position,
    catalog: &CardCatalog,
    config: &AiConfig,
    rng: &mut GameRng,
) -> EngineResult<AiChoice> {
    let started = Instant::now();
    let mut stats = SearchStats::new();

    let (turn, score) = policy_for(config.kind)
        .choose(position, catalog, config, rng, &mut stats)?
        .ok_or(EngineError::InvalidStatus(GameStatus::GameOver))?;

    stats.time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    trace!(
        player = %position.to_move,
        ?turn,
        score,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        exhausted = stats.budget_exhausted,
        "ai turn selected"
    );
    Ok(AiChoice { turn, score, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legal_turns;
    use crate::zones::CardPossession;

    #[test]
    fn test_every_difficulty_returns_legal_turn() {
        let catalog = CardCatalog::standard();
        for seed in 0..4 {
            let mut rng = GameRng::new(seed);
            let cards = CardPossession::deal(&catalog, &mut rng).unwrap();
            let position = Position::standard(cards, &catalog).unwrap();
            let legal = legal_turns(&position, &catalog).unwrap();

            for difficulty in Difficulty::ALL {
                let config = AiConfig::from_difficulty(difficulty).with_node_budget(2_000);
                let choice = select_turn(&position, &catalog, &config, &mut rng).unwrap();
                assert!(legal.contains(&choice.turn), "{difficulty} chose {:?}", choice.turn);
            }
        }
    }

    #[test]
    fn test_policy_for_kinds() {
        let catalog = CardCatalog::standard();
        let cards = CardPossession::default_deal(&catalog).unwrap();
        let position = Position::standard(cards, &catalog).unwrap();
        let config = AiConfig::from_difficulty(Difficulty::Easy);

        let mut a = GameRng::new(9);
        let mut b = GameRng::new(9);
        let first = select_turn(&position, &catalog, &config, &mut a).unwrap();
        let second = select_turn(&position, &catalog, &config, &mut b).unwrap();
        assert_eq!(first.turn, second.turn);
    }
}
