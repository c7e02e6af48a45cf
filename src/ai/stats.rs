//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one AI query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, root children included.
    pub nodes: u64,

    /// Positions scored by the static evaluation.
    pub evaluations: u64,

    /// Alpha-beta cutoffs.
    pub cutoffs: u64,

    /// Deepest ply reached.
    pub max_depth: u8,

    /// Set when the node budget ran out before the search finished.
    pub budget_exhausted: bool,

    /// Time spent in the query (microseconds). Informational only.
    pub time_us: u64,
}

impl SearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Nodes per second, or 0 for an untimed query.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    pub(crate) fn visit(&mut self, ply: u8) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(ply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.nodes, 0);
        assert!(!stats.budget_exhausted);
    }

    #[test]
    fn test_visit_tracks_depth() {
        let mut stats = SearchStats::new();
        stats.visit(1);
        stats.visit(3);
        stats.visit(2);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.nodes_per_second(), 0.0);

        stats.nodes = 500;
        stats.time_us = 500_000;
        assert_eq!(stats.nodes_per_second(), 1000.0);

        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
