//! The game engine: lifecycle state machine and the only mutating API.
//!
//! ## Lifecycle
//!
//! ```text
//! Menu -> Playing <-> Paused
//!            |
//!            v
//!        GameOver -> VictoryScreen
//! ```
//!
//! `start_new_game` and `start_with` enter `Playing` from any status;
//! `reset` returns to `Menu`.
//!
//! ## Turn protocol
//!
//! `select_piece` and `select_card` only narrow UI state. `make_move`,
//! `pass_turn` and `commit_turn` re-validate everything and are the single
//! commit point. A failing call changes nothing.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ai::{select_turn, AiChoice, AiConfig, Difficulty};
use crate::board::{Board, Piece};
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{
    AiSettings, Coord, EngineConfig, EngineError, EngineResult, GameRng, GameState, GameStatus,
    LegalDestinations, Move, MoveOutcome, Player, Selection, Turn, TurnRecord, VictoryCondition, BOARD_SIZE,
};
use crate::rules::{self, destinations, Position};
use crate::zones::CardPossession;

use super::save::{SaveGame, SAVE_VERSION};
use super::setup::GameSetup;
use super::stats::GameStats;

/// Game engine.
///
/// ## Example
///
/// ```
/// use temple_cards::core::{Coord, GameStatus};
/// use temple_cards::engine::{GameEngine, GameSetup};
///
/// let mut engine = GameEngine::new();
/// engine
///     .start_with(GameSetup::standard().with_cards(["Tiger", "Ox"], ["Boar", "Eel"], "Crab"))
///     .unwrap();
///
/// engine.select_piece(Coord::new(4, 2)).unwrap();
/// engine.select_card("Tiger").unwrap();
/// assert_eq!(engine.legal_destinations(), &[Coord::new(2, 2)]);
///
/// let outcome = engine.make_move(Coord::new(4, 2), Coord::new(2, 2), "Tiger").unwrap();
/// assert!(outcome.captured.is_none());
/// assert_eq!(engine.status(), GameStatus::Playing);
/// assert_eq!(engine.center_card().map(|c| c.name()), Some("Tiger"));
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    catalog: CardCatalog,
    config: EngineConfig,
    position: Position,
    state: GameState,
    rng: GameRng,
    stats: GameStats,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Engine with the standard catalog and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with the standard catalog.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::assemble(CardCatalog::standard(), config)
    }

    /// Engine over a custom catalog. The catalog needs at least five cards.
    pub fn with_catalog(catalog: CardCatalog, config: EngineConfig) -> EngineResult<Self> {
        CardPossession::default_deal(&catalog)?;
        Ok(Self::assemble(catalog, config))
    }

    fn assemble(catalog: CardCatalog, config: EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            catalog,
            config,
            position: Self::menu_position(),
            state: GameState::new(),
            rng,
            stats: GameStats::new(),
        }
    }

    /// Standard board with the first five catalog cards, Player 1 to move.
    fn menu_position() -> Position {
        Position::new(Board::new(), CardPossession::opening(), Player::One)
    }

    // === Lifecycle ===

    /// Deal a fresh game on the standard board and start playing.
    pub fn start_new_game(&mut self) -> EngineResult<()> {
        self.start_with(GameSetup::standard())
    }

    /// Start playing from a custom setup. On error the engine is untouched.
    pub fn start_with(&mut self, setup: GameSetup) -> EngineResult<()> {
        let mut rng = self.rng.clone();
        let position = setup.build(&self.catalog, &mut rng)?;

        self.rng = rng;
        self.state = GameState::playing(position.to_move);
        self.position = position;

        let hand = |p: Player| self.position.cards.hand(p).map(|id| self.catalog.name_of(id).to_string());
        debug!(
            first = %self.position.to_move,
            p1 = ?hand(Player::One),
            p2 = ?hand(Player::Two),
            center = self.catalog.name_of(self.position.cards.center()),
            "game started"
        );
        Ok(())
    }

    pub fn pause(&mut self) -> EngineResult<()> {
        self.require(GameStatus::Playing)?;
        self.state.status = GameStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> EngineResult<()> {
        self.require(GameStatus::Paused)?;
        self.state.status = GameStatus::Playing;
        Ok(())
    }

    /// Move from `GameOver` to the `VictoryScreen` sub-state.
    pub fn acknowledge_victory(&mut self) -> EngineResult<()> {
        self.require(GameStatus::GameOver)?;
        self.state.status = GameStatus::VictoryScreen;
        Ok(())
    }

    /// Back to the menu with the standard board and default cards.
    ///
    /// Aggregate statistics and the random stream are left alone, so
    /// calling this twice is the same as calling it once.
    pub fn reset(&mut self) {
        self.position = Self::menu_position();
        self.state.reset();
    }

    /// Advance the frame clock.
    ///
    /// While playing, accumulates game time and, if the AI controls the
    /// player to move, plays the AI's turn.
    pub fn tick(&mut self, dt: Duration) -> EngineResult<Option<MoveOutcome>> {
        if !self.state.is_playing() {
            return Ok(None);
        }
        self.state.game_duration += dt;
        if self.is_ai_turn() {
            return self.play_ai_turn().map(Some);
        }
        Ok(None)
    }

    fn require(&self, status: GameStatus) -> EngineResult<()> {
        if self.state.status == status {
            Ok(())
        } else {
            Err(EngineError::InvalidStatus(self.state.status))
        }
    }

    // === Selection ===

    /// Select one of the current player's pieces.
    ///
    /// Drops any selected card and its destinations.
    pub fn select_piece(&mut self, coord: Coord) -> EngineResult<()> {
        self.require(GameStatus::Playing)?;
        let player = self.state.current_player;
        if !coord.is_on_board() {
            return Err(EngineError::OutOfBounds(coord));
        }
        let piece = self.position.board.piece_at(coord).ok_or(EngineError::EmptySquare(coord))?;
        if piece.owner != player {
            return Err(EngineError::NotYourPiece { square: coord, player });
        }

        // A new piece starts a new selection; the card is chosen after it.
        self.state.selection = Selection {
            piece: Some(coord),
            card: None,
        };
        self.state.legal_destinations.clear();
        Ok(())
    }

    /// Select one of the current player's cards by name.
    ///
    /// With a piece already selected, recomputes the legal destinations.
    pub fn select_card(&mut self, name: &str) -> EngineResult<()> {
        self.require(GameStatus::Playing)?;
        let card = self.held_card(name)?;

        let selection = Selection {
            piece: self.state.selection.piece,
            card: Some(card),
        };
        let destinations = selection_destinations(&self.position, &self.catalog, &selection)?;
        self.state.selection = selection;
        self.state.legal_destinations = destinations;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    fn held_card(&self, name: &str) -> EngineResult<CardId> {
        let player = self.state.current_player;
        let card = self.catalog.resolve(name)?;
        if !self.position.cards.holds(player, card) {
            return Err(EngineError::CardNotHeld {
                player,
                card: name.to_string(),
            });
        }
        Ok(card)
    }

    // === Commands ===

    /// Move a piece with a named card. The authoritative commit point.
    pub fn make_move(&mut self, from: Coord, to: Coord, card: &str) -> EngineResult<MoveOutcome> {
        self.require(GameStatus::Playing)?;
        let card = self.catalog.resolve(card)?;
        self.commit_turn(Turn::Move(Move::new(from, to, card)))
    }

    /// Forced pass: exchange a named card without moving. Rejected while
    /// any legal move exists.
    pub fn pass_turn(&mut self, card: &str) -> EngineResult<MoveOutcome> {
        self.require(GameStatus::Playing)?;
        let card = self.catalog.resolve(card)?;
        self.commit_turn(Turn::Pass(card))
    }

    /// Validate and commit a turn for the current player.
    pub fn commit_turn(&mut self, turn: Turn) -> EngineResult<MoveOutcome> {
        self.require(GameStatus::Playing)?;

        let player = self.state.current_player;
        let outcome = match self.position.apply_turn(&self.catalog, turn) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(%player, ?turn, %err, "turn rejected");
                return Err(err);
            }
        };

        let index = self.state.history.len() as u32;
        self.state.record_turn(TurnRecord::new(player, turn, index), outcome.victory);
        debug_assert_eq!(self.state.current_player, self.position.to_move);

        match turn {
            Turn::Move(mv) => debug!(
                %player,
                from = %mv.from,
                to = %mv.to,
                card = self.catalog.name_of(mv.card),
                captured = outcome.captured.is_some(),
                "move committed"
            ),
            Turn::Pass(card) => debug!(%player, card = self.catalog.name_of(card), "forced pass"),
        }

        if let Some(condition) = outcome.victory {
            self.finish_game(player, condition);
        }
        Ok(outcome)
    }

    fn finish_game(&mut self, winner: Player, condition: VictoryCondition) {
        let catalog = &self.catalog;
        let used = self.state.history.iter().map(|record| catalog.name_of(record.turn.card()));
        self.stats.record_game(winner, self.state.move_count, used);
        info!(
            %winner,
            ?condition,
            moves = self.state.move_count,
            duration_ms = self.state.game_duration.as_millis() as u64,
            games_played = self.stats.games_played,
            "game over"
        );
    }

    // === AI ===

    /// Configure or remove the AI opponent.
    pub fn set_ai_opponent(&mut self, ai: Option<AiSettings>) {
        self.config.ai = ai;
    }

    /// True if the configured AI controls the player to move.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.state.is_playing() && self.config.is_ai(self.state.current_player)
    }

    /// Let the AI choose and commit a turn for the current player.
    ///
    /// Uses the configured AI difficulty, or Medium for hosts that drive
    /// both seats themselves.
    pub fn play_ai_turn(&mut self) -> EngineResult<MoveOutcome> {
        self.require(GameStatus::Playing)?;
        let difficulty = self.config.ai.map_or(Difficulty::default(), |ai| ai.difficulty);
        self.play_ai_turn_as(difficulty)
    }

    /// Let the AI commit a turn at the given difficulty.
    pub fn play_ai_turn_as(&mut self, difficulty: Difficulty) -> EngineResult<MoveOutcome> {
        self.require(GameStatus::Playing)?;
        let config = AiConfig::from_difficulty(difficulty);
        let mut rng = self.rng.fork();
        let choice = select_turn(&self.position, &self.catalog, &config, &mut rng)?;
        self.commit_turn(choice.turn)
    }

    /// Suggest a turn without changing anything, the random stream included.
    pub fn suggest_turn(&self, difficulty: Difficulty) -> EngineResult<AiChoice> {
        self.require(GameStatus::Playing)?;
        let mut rng = self.rng.clone().fork();
        select_turn(&self.position, &self.catalog, &AiConfig::from_difficulty(difficulty), &mut rng)
    }

    // === Persistence ===

    /// Encode the full game for later `load_game`.
    pub fn save_game(&self) -> EngineResult<Vec<u8>> {
        SaveGame {
            version: SAVE_VERSION,
            catalog: SaveGame::fingerprint(&self.catalog),
            config: self.config.clone(),
            state: self.state.clone(),
            position: self.position.clone(),
            rng: self.rng.state(),
        }
        .encode()
    }

    /// Replace the current game with a saved one.
    ///
    /// The save is fully validated first; on any error the engine keeps its
    /// current game. Aggregate statistics are not part of a save.
    pub fn load_game(&mut self, bytes: &[u8]) -> EngineResult<()> {
        let save = SaveGame::decode(bytes).and_then(|save| {
            save.validate(&self.catalog)?;
            Ok(save)
        });
        let save = match save {
            Ok(save) => save,
            Err(err) => {
                warn!(%err, "save rejected");
                return Err(err);
            }
        };

        self.config = save.config;
        self.state = save.state;
        self.position = save.position;
        self.rng = GameRng::from_state(&save.rng);
        debug!(status = ?self.state.status, moves = self.state.move_count, "game loaded");
        Ok(())
    }

    // === Statistics ===

    #[must_use]
    pub fn game_stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.state.winner
    }

    #[must_use]
    pub fn victory_condition(&self) -> VictoryCondition {
        self.state.victory_condition
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.state.move_count
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.state.turn_count
    }

    #[must_use]
    pub fn game_duration(&self) -> Duration {
        self.state.game_duration
    }

    /// True once the configured turn cap has been reached.
    #[must_use]
    pub fn turn_limit_reached(&self) -> bool {
        self.config.max_turns.is_some_and(|max| self.state.turn_count >= max)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    /// Occupancy grid for rendering.
    #[must_use]
    pub fn occupancy(&self) -> [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        self.position.board.occupancy()
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    #[must_use]
    pub fn selected_piece(&self) -> Option<Coord> {
        self.state.selection.piece
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        self.state.selection.card.and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub fn legal_destinations(&self) -> &[Coord] {
        &self.state.legal_destinations
    }

    /// Cards held by `player`, in hand order.
    #[must_use]
    pub fn player_cards(&self, player: Player) -> Vec<&Card> {
        self.position
            .cards
            .hand(player)
            .into_iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    #[must_use]
    pub fn center_card(&self) -> Option<&Card> {
        self.catalog.get(self.position.cards.center())
    }

    /// Destinations of the current player's piece on `from` over both held
    /// cards, without duplicates. Empty for anything but an own piece.
    #[must_use]
    pub fn valid_moves_from(&self, from: Coord) -> Vec<Coord> {
        let mut squares: Vec<Coord> = rules::moves_from(&self.position, &self.catalog, from)
            .unwrap_or_default()
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        squares.sort_unstable();
        squares.dedup();
        squares
    }

    /// Every legal move with the named card for the current player.
    pub fn valid_moves_for_card(&self, name: &str) -> EngineResult<Vec<Move>> {
        let card = self.held_card(name)?;
        rules::moves_for_card(&self.position, &self.catalog, card)
    }

    /// All legal moves for the current player.
    pub fn legal_moves(&self) -> EngineResult<Vec<Move>> {
        rules::legal_moves(&self.position, &self.catalog)
    }

    /// All legal turns, forced passes included.
    pub fn legal_turns(&self) -> EngineResult<Vec<Turn>> {
        rules::legal_turns(&self.position, &self.catalog)
    }
}

/// Destinations implied by a selection: empty unless both a piece and a
/// card are selected. Fails if the selection is not the current player's.
pub(crate) fn selection_destinations(
    position: &Position,
    catalog: &CardCatalog,
    selection: &Selection,
) -> EngineResult<LegalDestinations> {
    let player = position.to_move;
    if let Some(coord) = selection.piece {
        let piece = position.board.piece_at(coord).ok_or(EngineError::EmptySquare(coord))?;
        if piece.owner != player {
            return Err(EngineError::NotYourPiece { square: coord, player });
        }
    }
    if let Some(card) = selection.card {
        if !position.cards.holds(player, card) {
            return Err(EngineError::CardNotHeld {
                player,
                card: catalog.name_of(card).to_string(),
            });
        }
    }

    match (selection.piece, selection.card) {
        (Some(from), Some(card)) => {
            let definition = catalog.card(card)?;
            Ok(destinations(&position.board, definition, from, player).into_iter().collect())
        }
        _ => Ok(LegalDestinations::new()),
    }
}
