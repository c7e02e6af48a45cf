//! Depth-limited negamax with alpha-beta pruning.
//!
//! ## Bounded work
//!
//! Besides the depth limit, every call carries a node budget. Once the
//! budget is spent, remaining nodes are scored statically instead of being
//! expanded, so the amount of work per call is fixed by the configuration
//! and never by the clock.
//!
//! ## Move ordering
//!
//! Winning moves first, then captures, then the rest in generation order.
//! Good ordering is what makes the cutoffs pay off at depth 4.

use crate::cards::CardCatalog;
use crate::core::{EngineResult, Player, Turn};
use crate::rules::{legal_turns, Position};

use super::config::AiConfig;
use super::eval::{evaluate, WIN_SCORE};
use super::stats::SearchStats;

/// Larger than any reachable score.
pub const INFINITY: i32 = WIN_SCORE * 2;

/// Alpha-beta searcher over one catalog.
pub struct AlphaBeta<'a> {
    catalog: &'a CardCatalog,
    depth: u8,
    /// Maximum nodes per search; 0 disables the cap.
    node_budget: u64,
    stats: SearchStats,
}

impl<'a> AlphaBeta<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, config: &AiConfig) -> Self {
        Self {
            catalog,
            depth: config.depth.max(1),
            node_budget: config.node_budget,
            stats: SearchStats::new(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn into_stats(self) -> SearchStats {
        self.stats
    }

    /// Score every legal root turn for the player to move.
    ///
    /// Turns tied with the best score carry their exact value; weaker turns
    /// may carry an upper bound. Empty once the game is over.
    pub fn search(&mut self, position: &Position) -> EngineResult<Vec<(Turn, i32)>> {
        let player = position.to_move;
        let mut turns = legal_turns(position, self.catalog)?;
        order_turns(position, &mut turns);

        let mut scored = Vec::with_capacity(turns.len());
        let mut best = -INFINITY;
        for turn in turns {
            let mut child = position.clone();
            child.apply_turn(self.catalog, turn)?;
            self.stats.visit(1);

            // One below the best so far, so ties are scored exactly.
            let alpha = (best - 1).max(-INFINITY);
            let score = -self.negamax(&child, self.depth - 1, 1, -INFINITY, -alpha, player.opponent())?;
            best = best.max(score);
            scored.push((turn, score));
        }
        Ok(scored)
    }

    fn negamax(
        &mut self,
        position: &Position,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        beta: i32,
        player: Player,
    ) -> EngineResult<i32> {
        if let Some(result) = position.result {
            self.stats.evaluations += 1;
            let score = WIN_SCORE - i32::from(ply);
            return Ok(if result.is_winner(player) { score } else { -score });
        }

        let exhausted = self.node_budget > 0 && self.stats.nodes >= self.node_budget;
        if depth == 0 || exhausted {
            self.stats.budget_exhausted |= exhausted;
            self.stats.evaluations += 1;
            return Ok(evaluate(position, self.catalog, player));
        }
        debug_assert_eq!(position.to_move, player);

        let mut turns = legal_turns(position, self.catalog)?;
        order_turns(position, &mut turns);

        let mut best = -INFINITY;
        for turn in turns {
            let mut child = position.clone();
            child.apply_turn(self.catalog, turn)?;
            self.stats.visit(ply + 1);

            let score = -self.negamax(&child, depth - 1, ply + 1, -beta, -alpha, player.opponent())?;
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }
        Ok(best)
    }
}

/// Sort turns so that wins come first and captures second. Stable.
pub fn order_turns(position: &Position, turns: &mut [Turn]) {
    let player = position.to_move;
    let opponent_temple = player.opponent().home_temple();
    let rank = |turn: &Turn| -> u8 {
        let Some(mv) = turn.as_move() else {
            return 3;
        };
        let target = position.board.piece_at(mv.to);
        let mover = position.board.piece_at(mv.from);
        if target.is_some_and(|p| p.is_master()) || (mover.is_some_and(|p| p.is_master()) && mv.to == opponent_temple) {
            0
        } else if target.is_some() {
            1
        } else {
            2
        }
    };
    turns.sort_by_key(rank);
}
