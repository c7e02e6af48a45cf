//! Turn and lifecycle state.
//!
//! ## GameState
//!
//! Everything about a game in progress except the board and the cards:
//! - Lifecycle status and the player to move
//! - Victory condition and winner once the game ends
//! - Move/turn counters and the elapsed game duration
//! - Advisory selection (piece and card) with its legal destinations
//! - History of committed turns
//!
//! The board and card possession live beside it in `GameEngine`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::TurnRecord;
use super::coord::Coord;
use super::player::Player;
use crate::cards::CardId;

/// Lifecycle status of the engine.
///
/// `Menu -> Playing <-> Paused -> GameOver -> VictoryScreen`, and back to
/// `Menu` or `Playing` through reset or a new game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    /// Sub-state of `GameOver` once the result has been presented.
    VictoryScreen,
}

impl GameStatus {
    /// True for `GameOver` and its `VictoryScreen` sub-state.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::VictoryScreen)
    }
}

/// How the game was won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryCondition {
    #[default]
    None,
    /// The opponent's Master was captured.
    MasterCapture,
    /// The mover's Master reached the opponent's home temple.
    TempleVictory,
}

/// Legal destinations for the current selection. At most 2 cards x 4 offsets.
pub type LegalDestinations = SmallVec<[Coord; 8]>;

/// Advisory UI selection. Only `make_move` is authoritative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub piece: Option<Coord>,
    pub card: Option<CardId>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none() && self.card.is_none()
    }
}

/// Turn and lifecycle state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Lifecycle ===
    pub status: GameStatus,
    pub current_player: Player,

    // === Result ===
    pub victory_condition: VictoryCondition,
    pub winner: Option<Player>,

    // === Counters ===
    /// Committed moves, including a winning move.
    pub move_count: u32,
    /// Turns handed to the opponent (moves and passes that did not end the game).
    pub turn_count: u32,
    pub game_duration: Duration,

    // === Selection ===
    pub selection: Selection,
    pub legal_destinations: LegalDestinations,

    // === History ===
    pub history: Vec<TurnRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial state: in the menu, Player 1 to move, nothing played.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: GameStatus::Menu,
            current_player: Player::One,
            victory_condition: VictoryCondition::None,
            winner: None,
            move_count: 0,
            turn_count: 0,
            game_duration: Duration::ZERO,
            selection: Selection::default(),
            legal_destinations: SmallVec::new(),
            history: Vec::new(),
        }
    }

    /// Return to the initial values.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fresh state for a game that starts immediately.
    #[must_use]
    pub fn playing(first: Player) -> Self {
        Self {
            status: GameStatus::Playing,
            current_player: first,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }

    /// Drop the selection and its destination set.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
        self.legal_destinations.clear();
    }

    /// Record a committed turn and hand the turn over unless it won.
    pub(crate) fn record_turn(&mut self, record: TurnRecord, victory: Option<VictoryCondition>) {
        if !record.turn.is_pass() {
            self.move_count += 1;
        }
        self.history.push(record);
        self.clear_selection();

        match victory {
            Some(condition) => {
                self.status = GameStatus::GameOver;
                self.victory_condition = condition;
                self.winner = Some(record.player);
            }
            None => {
                self.turn_count += 1;
                self.current_player = record.player.opponent();
            }
        }
    }

    /// Check the relations between fields that a loaded save must satisfy.
    pub(crate) fn is_consistent(&self) -> bool {
        let result_matches = match (self.victory_condition, self.winner) {
            (VictoryCondition::None, None) => !self.status.is_finished(),
            (VictoryCondition::None, Some(_)) | (_, None) => false,
            (_, Some(_)) => self.status.is_finished(),
        };
        let counters_match = self.history.len() as u64
            == u64::from(self.turn_count) + u64::from(self.winner.is_some())
            && self.history.iter().filter(|r| !r.turn.is_pass()).count() as u64
                == u64::from(self.move_count);

        result_matches && counters_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Move, Turn};

    fn step(player: Player, index: u32) -> TurnRecord {
        let mv = Move::new(Coord::new(4, 0), Coord::new(3, 0), CardId::new(0));
        TurnRecord::new(player, Turn::Move(mv), index)
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.status, GameStatus::Menu);
        assert_eq!(state.current_player, Player::One);
        assert_eq!(state.victory_condition, VictoryCondition::None);
        assert!(state.winner.is_none());
        assert!(state.selection.is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_record_turn_flips_player() {
        let mut state = GameState::playing(Player::Two);
        state.selection.piece = Some(Coord::new(0, 0));
        state.legal_destinations.push(Coord::new(1, 0));

        state.record_turn(step(Player::Two, 0), None);

        assert_eq!(state.current_player, Player::One);
        assert_eq!(state.move_count, 1);
        assert_eq!(state.turn_count, 1);
        assert!(state.selection.is_empty());
        assert!(state.legal_destinations.is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_record_pass_counts_turn_only() {
        let mut state = GameState::playing(Player::One);
        state.record_turn(TurnRecord::new(Player::One, Turn::Pass(CardId::new(1)), 0), None);

        assert_eq!(state.move_count, 0);
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.current_player, Player::Two);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_record_winning_turn() {
        let mut state = GameState::playing(Player::One);
        state.record_turn(step(Player::One, 0), Some(VictoryCondition::TempleVictory));

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.winner, Some(Player::One));
        assert_eq!(state.current_player, Player::One);
        assert_eq!(state.move_count, 1);
        assert_eq!(state.turn_count, 0);
        assert!(state.is_game_over());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_inconsistent_states() {
        let mut state = GameState::playing(Player::One);
        state.winner = Some(Player::One);
        assert!(!state.is_consistent());

        let mut state = GameState::playing(Player::One);
        state.move_count = 3;
        assert!(!state.is_consistent());

        let mut state = GameState::new();
        state.status = GameStatus::GameOver;
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::playing(Player::Two);
        state.record_turn(step(Player::Two, 0), None);
        state.reset();
        assert_eq!(state, GameState::new());
    }
}
