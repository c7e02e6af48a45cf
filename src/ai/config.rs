//! AI configuration: difficulty levels and the search parameters they imply.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AI difficulty, from 1 (Easy) to 3 (Hard).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal turn.
    Easy,
    /// One-ply greedy on the static evaluation.
    #[default]
    Medium,
    /// Bounded alpha-beta lookahead.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Difficulty for a numeric level (1..=3).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Unrecognized difficulty text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty {0:?} (expected easy, medium, hard or 1-3)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "normal" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// How the selector picks a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchKind {
    Random,
    Greedy,
    AlphaBeta,
}

/// Search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub kind: SearchKind,

    /// Plies searched by `AlphaBeta`. Ignored by the other kinds.
    pub depth: u8,

    /// Hard cap on nodes visited per call. Once reached, remaining nodes
    /// are scored statically, so work per call is bounded regardless of
    /// wall-clock speed.
    pub node_budget: u64,

    /// Amplitude of uniform noise added to root scores (0 = none).
    pub noise: i32,
}

impl AiConfig {
    #[must_use]
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                kind: SearchKind::Random,
                depth: 0,
                node_budget: 0,
                noise: 0,
            },
            Difficulty::Medium => Self {
                kind: SearchKind::Greedy,
                depth: 1,
                node_budget: 1_000,
                noise: 10,
            },
            Difficulty::Hard => Self {
                kind: SearchKind::AlphaBeta,
                depth: 4,
                node_budget: 60_000,
                noise: 0,
            },
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = budget;
        self
    }

    #[must_use]
    pub fn with_noise(mut self, noise: i32) -> Self {
        self.noise = noise.max(0);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

impl From<Difficulty> for AiConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::from_difficulty(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_level(difficulty.level()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_level(0), None);
        assert_eq!(Difficulty::from_level(4), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" 1 ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("normal".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_from_difficulty() {
        assert_eq!(AiConfig::from_difficulty(Difficulty::Easy).kind, SearchKind::Random);
        assert_eq!(AiConfig::from_difficulty(Difficulty::Medium).kind, SearchKind::Greedy);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.kind, SearchKind::AlphaBeta);
        assert_eq!(hard.depth, 4);
        assert!(hard.node_budget > 0);
    }

    #[test]
    fn test_builders() {
        let config = AiConfig::from(Difficulty::Hard)
            .with_depth(2)
            .with_node_budget(500)
            .with_noise(-3);
        assert_eq!(config.depth, 2);
        assert_eq!(config.node_budget, 500);
        assert_eq!(config.noise, 0);
    }

    #[test]
    fn test_serialization() {
        let config = AiConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);

        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }
}
