//! Save games.
//!
//! A save is a bincode-encoded `SaveGame` record. Decoding only proves the
//! bytes are well formed; `SaveGame::validate` then checks every game
//! invariant before the engine adopts any of it.

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::{EngineConfig, EngineError, EngineResult, GameRngState, GameState};
use crate::rules::{victory_after, GameResult, Position};

use super::game::selection_destinations;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a game exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    /// Text form of every catalog card, to detect a different card set.
    pub catalog: Vec<String>,
    pub config: EngineConfig,
    pub state: GameState,
    pub position: Position,
    pub rng: GameRngState,
}

impl SaveGame {
    pub fn encode(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Text form of a catalog as stored in saves.
    #[must_use]
    pub fn fingerprint(catalog: &CardCatalog) -> Vec<String> {
        catalog.iter().map(|(_, card)| card.encode()).collect()
    }

    /// Check the record against `catalog` and every game invariant.
    pub fn validate(&self, catalog: &CardCatalog) -> EngineResult<()> {
        let corrupt = |msg: &str| EngineError::CorruptSave(msg.to_string());

        if self.version != SAVE_VERSION {
            return Err(EngineError::CorruptSave(format!(
                "unsupported save version {} (expected {SAVE_VERSION})",
                self.version
            )));
        }
        if self.catalog != Self::fingerprint(catalog) {
            return Err(corrupt("saved with a different card catalog"));
        }

        let position = &self.position;
        let state = &self.state;
        position.board.validate()?;
        position
            .cards
            .validate(catalog)
            .map_err(|err| EngineError::CorruptSave(err.to_string()))?;

        if !state.is_consistent() {
            return Err(corrupt("game state counters or result are inconsistent"));
        }
        if state.current_player != position.to_move {
            return Err(corrupt("current player does not match the position"));
        }
        for (index, record) in state.history.iter().enumerate() {
            if record.index as usize != index {
                return Err(corrupt("turn history is out of order"));
            }
            if !catalog.contains(record.turn.card()) {
                return Err(EngineError::CorruptSave(format!(
                    "turn {index} played unknown {}",
                    record.turn.card()
                )));
            }
        }

        match state.winner {
            Some(winner) => {
                let expected = GameResult {
                    winner,
                    condition: state.victory_condition,
                };
                if position.result != Some(expected) {
                    return Err(corrupt("recorded winner does not match the position"));
                }
                if victory_after(&position.board, winner) != Some(state.victory_condition) {
                    return Err(corrupt("board does not show the recorded victory"));
                }
            }
            None => {
                if position.result.is_some() {
                    return Err(corrupt("position is decided but the game is not over"));
                }
                position
                    .validate(catalog)
                    .map_err(|err| EngineError::CorruptSave(err.to_string()))?;
            }
        }

        let destinations = selection_destinations(position, catalog, &state.selection)
            .map_err(|err| EngineError::CorruptSave(format!("invalid selection: {err}")))?;
        if destinations != state.legal_destinations {
            return Err(corrupt("legal destinations do not match the selection"));
        }
        Ok(())
    }
}
