//! Turn-selection policies.
//!
//! Policies are trait-based so hosts and tests can plug in their own:
//! - `RandomPolicy`: uniformly random legal turn (Easy)
//! - `GreedyPolicy`: best static evaluation one ply ahead (Medium)
//! - `SearchPolicy`: alpha-beta lookahead (Hard)
//!
//! Every policy draws only from `rules::legal_turns`, so a policy can play
//! badly but never illegally.

use crate::cards::CardCatalog;
use crate::core::{EngineResult, GameRng, Turn};
use crate::rules::{legal_turns, Position};

use super::config::AiConfig;
use super::eval::evaluate;
use super::search::AlphaBeta;
use super::stats::SearchStats;

/// A scored choice.
pub type Scored = (Turn, i32);

/// Policy for choosing a turn.
pub trait TurnPolicy: Send + Sync {
    /// Choose a turn for the player to move, or `None` once the game is over.
    fn choose(
        &self,
        position: &Position,
        catalog: &CardCatalog,
        config: &AiConfig,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> EngineResult<Option<Scored>>;
}

// =============================================================================
// Random
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl TurnPolicy for RandomPolicy {
    fn choose(
        &self,
        position: &Position,
        catalog: &CardCatalog,
        _config: &AiConfig,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> EngineResult<Option<Scored>> {
        let turns = legal_turns(position, catalog)?;
        stats.nodes += turns.len() as u64;
        Ok(rng.choose(&turns).map(|&turn| (turn, 0)))
    }
}

// =============================================================================
// Greedy
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl TurnPolicy for GreedyPolicy {
    fn choose(
        &self,
        position: &Position,
        catalog: &CardCatalog,
        config: &AiConfig,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> EngineResult<Option<Scored>> {
        let player = position.to_move;
        let mut scored = Vec::new();
        for turn in legal_turns(position, catalog)? {
            let mut child = position.clone();
            child.apply_turn(catalog, turn)?;
            stats.visit(1);
            stats.evaluations += 1;
            scored.push((turn, evaluate(&child, catalog, player)));
        }
        Ok(pick_best(scored, config.noise, rng))
    }
}

// =============================================================================
// Alpha-beta
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct SearchPolicy;

impl TurnPolicy for SearchPolicy {
    fn choose(
        &self,
        position: &Position,
        catalog: &CardCatalog,
        config: &AiConfig,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> EngineResult<Option<Scored>> {
        let mut search = AlphaBeta::new(catalog, config);
        let scored = search.search(position)?;
        *stats = search.into_stats();
        Ok(pick_best(scored, config.noise, rng))
    }
}

/// Highest score after noise; ties broken uniformly at random.
pub fn pick_best(scored: Vec<Scored>, noise: i32, rng: &mut GameRng) -> Option<Scored> {
    let noisy: Vec<Scored> = scored
        .into_iter()
        .map(|(turn, score)| (turn, score.saturating_add(rng.noise(noise))))
        .collect();
    let best = noisy.iter().map(|&(_, score)| score).max()?;
    let ties: Vec<Scored> = noisy.into_iter().filter(|&(_, score)| score == best).collect();
    rng.choose(&ties).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::board::{Board, PieceKind};
    use crate::core::{Coord, Move, Player, PlayerMap};
    use crate::zones::CardPossession;

    fn opening() -> (Position, CardCatalog) {
        let catalog = CardCatalog::standard();
        let id = |name: &str| catalog.by_name(name).unwrap();
        let hands = PlayerMap::new(|p| match p {
            Player::One => [id("Tiger"), id("Crab")],
            Player::Two => [id("Boar"), id("Ox")],
        });
        let cards = CardPossession::new(hands, id("Eel")).unwrap();
        (Position::new(Board::new(), cards, Player::One), catalog)
    }

    #[test]
    fn test_random_policy_is_legal() {
        let (position, catalog) = opening();
        let legal = legal_turns(&position, &catalog).unwrap();
        let mut rng = GameRng::new(3);
        let config = AiConfig::from_difficulty(Difficulty::Easy);

        for _ in 0..20 {
            let (turn, _) = RandomPolicy
                .choose(&position, &catalog, &config, &mut rng, &mut SearchStats::new())
                .unwrap()
                .unwrap();
            assert!(legal.contains(&turn));
        }
    }

    #[test]
    fn test_greedy_takes_free_master() {
        let (mut position, catalog) = opening();
        position.board.remove_piece(Coord::new(0, 2)).unwrap();
        position.board.place_piece(PieceKind::Master, Player::Two, Coord::new(2, 2)).unwrap();
        let tiger = catalog.by_name("Tiger").unwrap();

        let config = AiConfig::from_difficulty(Difficulty::Medium);
        let (turn, _) = GreedyPolicy
            .choose(&position, &catalog, &config, &mut GameRng::new(1), &mut SearchStats::new())
            .unwrap()
            .unwrap();
        assert_eq!(turn, Turn::Move(Move::new(Coord::new(4, 2), Coord::new(2, 2), tiger)));
    }

    #[test]
    fn test_pick_best_breaks_ties_randomly() {
        let tiger = crate::cards::CardId::new(15);
        let a = Turn::Pass(tiger);
        let b = Turn::Pass(crate::cards::CardId::new(2));
        let mut seen = std::collections::HashSet::new();
        let mut rng = GameRng::new(5);
        for _ in 0..64 {
            let (turn, score) = pick_best(vec![(a, 10), (b, 10), (Turn::Pass(crate::cards::CardId::new(0)), 3)], 0, &mut rng).unwrap();
            assert_eq!(score, 10);
            seen.insert(turn);
        }
        assert_eq!(seen.len(), 2);
        assert!(pick_best(Vec::new(), 0, &mut rng).is_none());
    }

    #[test]
    fn test_policies_return_none_when_finished() {
        let (mut position, catalog) = opening();
        position.result = Some(crate::rules::GameResult {
            winner: Player::Two,
            condition: crate::core::VictoryCondition::MasterCapture,
        });
        let config = AiConfig::default();
        let mut rng = GameRng::new(0);
        let mut stats = SearchStats::new();

        assert!(RandomPolicy.choose(&position, &catalog, &config, &mut rng, &mut stats).unwrap().is_none());
        assert!(GreedyPolicy.choose(&position, &catalog, &config, &mut rng, &mut stats).unwrap().is_none());
        assert!(SearchPolicy.choose(&position, &catalog, &config, &mut rng, &mut stats).unwrap().is_none());
    }
}
