//! Error types for the rules engine.
//!
//! Every rule-level failure is reported through `EngineError` and leaves the
//! engine exactly as it was before the call. Invariant violations are not
//! represented here; those are asserted in debug builds.

use thiserror::Error;

use super::coord::Coord;
use super::player::Player;
use super::state::GameStatus;

/// Errors returned by board, card, and engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the 5x5 board.
    #[error("coordinate {0} is off the board")]
    OutOfBounds(Coord),

    /// No piece on the given square.
    #[error("no piece at {0}")]
    EmptySquare(Coord),

    /// Target square already holds a piece that cannot be displaced.
    #[error("square {0} is already occupied")]
    Occupied(Coord),

    /// The piece belongs to the other player.
    #[error("piece at {square} does not belong to {player}")]
    NotYourPiece { square: Coord, player: Player },

    /// A second Master would be placed for the same player.
    #[error("{0} already has a Master on the board")]
    DuplicateMaster(Player),

    /// The player already has the maximum number of pieces of that kind.
    #[error("{0} cannot place another piece")]
    PieceLimit(Player),

    /// Card name is not part of the catalog.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// The player does not currently hold the card.
    #[error("{player} does not hold card {card}")]
    CardNotHeld { player: Player, card: String },

    /// Destination is not reachable with the chosen card.
    #[error("illegal move from {from} to {to} with {card}")]
    IllegalDestination { from: Coord, to: Coord, card: String },

    /// A pass was requested while a legal move exists.
    #[error("{0} has a legal move and cannot pass")]
    MustMove(Player),

    /// Command not allowed in the current game status.
    #[error("operation not allowed while {0:?}")]
    InvalidStatus(GameStatus),

    /// Card pattern has the wrong shape or markers.
    #[error("invalid card pattern: {0}")]
    InvalidPattern(String),

    /// Card data could not be parsed or is inconsistent.
    #[error("invalid card: {0}")]
    InvalidCard(String),

    /// Two catalog entries share a name.
    #[error("card {0} is already registered")]
    DuplicateCard(String),

    /// Dealt cards do not form a valid 2+2+1 split.
    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    /// A custom starting position breaks a game invariant.
    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    /// Save data decoded but violates a game invariant.
    #[error("corrupt save: {0}")]
    CorruptSave(String),

    /// Save data could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}
