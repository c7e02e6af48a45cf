//! Aggregate statistics across completed games.
//!
//! These counters live for the lifetime of the engine and have no bearing
//! on legality. Only finished games are counted; abandoned games leave no
//! trace.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerMap};

/// Aggregate statistics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub games_played: u32,
    pub wins: PlayerMap<u32>,

    /// Mean length of completed games, in committed moves.
    pub average_game_length: f64,

    /// Times each card was played to the Center, by name.
    pub card_usage: FxHashMap<String, u32>,
}

impl GameStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold one completed game into the aggregate.
    pub fn record_game<'a>(&mut self, winner: Player, moves: u32, cards_used: impl IntoIterator<Item = &'a str>) {
        let previous = f64::from(self.games_played);
        self.games_played += 1;
        self.wins[winner] += 1;
        self.average_game_length =
            (self.average_game_length * previous + f64::from(moves)) / f64::from(self.games_played);

        for name in cards_used {
            *self.card_usage.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    #[must_use]
    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player]
    }

    #[must_use]
    pub fn usage(&self, card: &str) -> u32 {
        self.card_usage.get(card).copied().unwrap_or(0)
    }

    /// Share of games won by `player`, or 0 before any game finished.
    #[must_use]
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins[player]) / f64::from(self.games_played)
        }
    }

    /// Cards by usage, most used first, ties by name.
    #[must_use]
    pub fn most_used(&self) -> Vec<(&str, u32)> {
        let mut usage: Vec<_> = self.card_usage.iter().map(|(name, &count)| (name.as_str(), count)).collect();
        usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        usage
    }
}
