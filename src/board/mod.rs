//! The 5x5 board: squares, pieces, and temple geometry.
//!
//! ## Key Types
//!
//! - `Board`: owns every piece in an arena; squares hold `Option<PieceId>`
//! - `Square`: occupancy plus the static temple marker
//! - `Piece`, `PieceKind`, `PieceId`
//!
//! The board knows nothing about turns or cards. It only enforces bounds,
//! occupancy, and the one-Master-per-player placement rule.

#[allow(clippy::module_inception)]
mod board;
mod piece;

pub use board::{Board, Square};
pub use piece::{Piece, PieceId, PieceKind};
