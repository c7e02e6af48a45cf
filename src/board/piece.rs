//! Pieces and the arena identifiers that squares refer to.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Player};

/// Kind of piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Capturing it, or bringing it to the opponent's temple, ends the game.
    Master,
    Monk,
}

/// Stable index of a piece in the board's arena.
///
/// Ids are never reused within one board layout; a captured piece leaves an
/// empty slot behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
    /// Square the piece stands on. Always matches the square referencing it.
    pub coord: Coord,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, owner: Player, coord: Coord) -> Self {
        Self { kind, owner, coord }
    }

    #[must_use]
    pub fn is_master(&self) -> bool {
        self.kind == PieceKind::Master
    }
}
