//! Board coordinates and relative offsets.
//!
//! Rows run from 0 (Player 2's back row) to 4 (Player 1's back row);
//! columns run left to right as seen from Player 1's seat.

use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: i8 = 5;

/// A square on the board, or a candidate square that may be off the board.
///
/// Signed so that offset arithmetic never wraps; use [`Coord::is_on_board`]
/// before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// True if the coordinate lies within a board of `size`.
    #[must_use]
    pub const fn in_bounds(self, size: i8) -> bool {
        self.row >= 0 && self.row < size && self.col >= 0 && self.col < size
    }

    /// True if the coordinate lies on the 5x5 board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.in_bounds(BOARD_SIZE)
    }

    /// Apply an offset. The result may be off the board; `None` only when
    /// it leaves the `i8` range.
    #[must_use]
    pub const fn offset(self, offset: Offset) -> Option<Self> {
        match (self.row.checked_add(offset.d_row), self.col.checked_add(offset.d_col)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }

    /// Offset that leads from `self` to `to`, or `None` if it does not fit
    /// in an `i8`.
    #[must_use]
    pub const fn delta_to(self, to: Coord) -> Option<Offset> {
        match (to.row.checked_sub(self.row), to.col.checked_sub(self.col)) {
            (Some(d_row), Some(d_col)) => Some(Offset::new(d_row, d_col)),
            _ => None,
        }
    }

    /// Point reflection through the board centre.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            row: (BOARD_SIZE - 1).saturating_sub(self.row),
            col: (BOARD_SIZE - 1).saturating_sub(self.col),
        }
    }

    /// Chebyshev distance (king moves) between two squares.
    #[must_use]
    pub fn distance(self, other: Coord) -> u16 {
        let dr = (i16::from(self.row) - i16::from(other.row)).unsigned_abs();
        let dc = (i16::from(self.col) - i16::from(other.col)).unsigned_abs();
        dr.max(dc)
    }

    /// Row-major index into a 25-element array. Only valid on the board.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "index of off-board {self}");
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Iterate over every square of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Relative displacement of a piece, in board coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub d_row: i8,
    pub d_col: i8,
}

impl Offset {
    #[must_use]
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    /// The same displacement seen from the opposite seat. Saturates at
    /// `i8::MIN`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            d_row: self.d_row.saturating_neg(),
            d_col: self.d_col.saturating_neg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Coord::new(0, 0).is_on_board());
        assert!(Coord::new(4, 4).is_on_board());
        assert!(!Coord::new(5, 0).is_on_board());
        assert!(!Coord::new(0, -1).is_on_board());
        assert!(Coord::new(6, 6).in_bounds(7));
    }

    #[test]
    fn test_offset_roundtrip() {
        let from = Coord::new(4, 2);
        let to = Coord::new(2, 3);
        let delta = from.delta_to(to).unwrap();
        assert_eq!(delta, Offset::new(-2, 1));
        assert_eq!(from.offset(delta), Some(to));
    }

    #[test]
    fn test_arithmetic_at_i8_limits() {
        assert_eq!(Coord::new(127, 0).offset(Offset::new(1, 0)), None);
        assert_eq!(Coord::new(-128, 0).offset(Offset::new(-2, 0)), None);
        assert_eq!(Coord::new(-100, 0).delta_to(Coord::new(100, 0)), None);
        assert_eq!(Offset::new(-128, 2).rotated(), Offset::new(127, -2));
        assert_eq!(Coord::new(-128, 127).distance(Coord::new(127, -128)), 255);
        assert!(!Coord::new(-128, -128).rotated().is_on_board());
    }

    #[test]
    fn test_rotation() {
        assert_eq!(Coord::new(4, 2).rotated(), Coord::new(0, 2));
        assert_eq!(Coord::new(1, 0).rotated(), Coord::new(3, 4));
        assert_eq!(Offset::new(-2, 1).rotated(), Offset::new(2, -1));
    }

    #[test]
    fn test_all_squares() {
        let squares: Vec<_> = Coord::all().collect();
        assert_eq!(squares.len(), 25);
        assert_eq!(squares[0], Coord::new(0, 0));
        assert_eq!(squares[24], Coord::new(4, 4));
        assert_eq!(Coord::new(2, 3).index(), 13);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Coord::new(4, 2).distance(Coord::new(0, 2)), 4);
        assert_eq!(Coord::new(1, 1).distance(Coord::new(2, 3)), 2);
    }
}
