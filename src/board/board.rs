//! Board storage and piece movement.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Coord, EngineError, EngineResult, Player, BOARD_SIZE};

use super::piece::{Piece, PieceId, PieceKind};

const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);
const MAX_MONKS: usize = 4;

/// A single board square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    /// Arena index of the occupying piece.
    pub occupant: Option<PieceId>,
    /// Whose home temple this is. Set at construction, never changed.
    pub temple: Option<Player>,
}

impl Square {
    #[must_use]
    pub fn is_temple(&self) -> bool {
        self.temple.is_some()
    }
}

/// The game board.
///
/// Pieces live in an arena (`pieces`) and squares refer to them by
/// `PieceId`. Removing a piece empties its arena slot, so ids held by other
/// code can never dangle onto a different piece.
///
/// ## Example
///
/// ```
/// use temple_cards::board::{Board, PieceKind};
/// use temple_cards::core::{Coord, Player};
///
/// let board = Board::new();
/// assert_eq!(board.find_master(Player::One), Some(Coord::new(4, 2)));
/// assert!(board.is_temple(Coord::new(0, 2)));
/// assert_eq!(board.piece_at(Coord::new(0, 0)).unwrap().kind, PieceKind::Monk);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: Vec<Square>,
    pieces: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board with the standard starting layout.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_pieces();
        board
    }

    /// Board with temples marked and no pieces.
    #[must_use]
    pub fn empty() -> Self {
        let mut squares = vec![Square::default(); SQUARE_COUNT];
        for player in Player::ALL {
            squares[player.home_temple().index()].temple = Some(player);
        }
        Self {
            squares,
            pieces: Vec::with_capacity(10),
        }
    }

    /// Restore the standard starting layout. Idempotent.
    pub fn initialize(&mut self) {
        self.clear();
        self.setup_initial_pieces();
    }

    /// Alias of [`Board::initialize`].
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Remove every piece. Temples are kept.
    pub fn clear(&mut self) {
        for square in &mut self.squares {
            square.occupant = None;
        }
        self.pieces.clear();
    }

    fn setup_initial_pieces(&mut self) {
        for player in Player::ALL {
            let row = player.home_row();
            for col in 0..BOARD_SIZE {
                let kind = if col == 2 { PieceKind::Master } else { PieceKind::Monk };
                let placed = self.place_piece(kind, player, Coord::new(row, col));
                debug_assert!(placed.is_ok(), "standard layout placement failed");
            }
        }
    }

    // === Piece Management ===

    /// Place a new piece.
    ///
    /// Fails without mutation if the coordinate is off the board, the square
    /// is occupied, or the player already has a Master.
    pub fn place_piece(&mut self, kind: PieceKind, owner: Player, coord: Coord) -> EngineResult<PieceId> {
        if !coord.is_on_board() {
            return Err(EngineError::OutOfBounds(coord));
        }
        if self.squares[coord.index()].occupant.is_some() {
            return Err(EngineError::Occupied(coord));
        }
        match kind {
            PieceKind::Master if self.find_master(owner).is_some() => {
                return Err(EngineError::DuplicateMaster(owner));
            }
            PieceKind::Monk if self.monk_count(owner) >= MAX_MONKS => {
                return Err(EngineError::PieceLimit(owner));
            }
            _ => {}
        }
        if self.pieces.len() >= u8::MAX as usize {
            return Err(EngineError::PieceLimit(owner));
        }

        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Some(Piece::new(kind, owner, coord)));
        self.squares[coord.index()].occupant = Some(id);
        self.debug_check();
        Ok(id)
    }

    /// Move the piece on `from` to `to`.
    ///
    /// An opposing piece on `to` is captured and returned. Turn ownership is
    /// not checked here; that is the engine's job.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> EngineResult<Option<Piece>> {
        if !from.is_on_board() {
            return Err(EngineError::OutOfBounds(from));
        }
        if !to.is_on_board() {
            return Err(EngineError::OutOfBounds(to));
        }
        let mover_id = self.squares[from.index()]
            .occupant
            .ok_or(EngineError::EmptySquare(from))?;
        if from == to {
            return Err(EngineError::Occupied(to));
        }
        let mover_owner = self.piece(mover_id).map(|p| p.owner);

        let captured = match self.squares[to.index()].occupant {
            Some(target_id) => {
                let target = self.piece(target_id).copied();
                if target.map(|t| t.owner) == mover_owner {
                    return Err(EngineError::Occupied(to));
                }
                self.pieces[target_id.index()] = None;
                target
            }
            None => None,
        };

        self.squares[from.index()].occupant = None;
        self.squares[to.index()].occupant = Some(mover_id);
        if let Some(piece) = self.pieces[mover_id.index()].as_mut() {
            piece.coord = to;
        }

        if let Some(captured) = captured {
            trace!(?captured, "piece captured");
        }
        self.debug_check();
        Ok(captured)
    }

    /// Remove and return the piece on `coord`.
    pub fn remove_piece(&mut self, coord: Coord) -> EngineResult<Piece> {
        if !coord.is_on_board() {
            return Err(EngineError::OutOfBounds(coord));
        }
        let id = self.squares[coord.index()]
            .occupant
            .ok_or(EngineError::EmptySquare(coord))?;
        let piece = self.pieces[id.index()].take().ok_or(EngineError::EmptySquare(coord))?;
        self.squares[coord.index()].occupant = None;
        self.debug_check();
        Ok(piece)
    }

    // === Queries ===

    /// Piece by arena id, if it is still on the board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    /// Piece on a square. `None` for empty or off-board squares.
    #[must_use]
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.square(coord)?.occupant.and_then(|id| self.piece(id))
    }

    /// Square data. `None` for off-board coordinates.
    #[must_use]
    pub fn square(&self, coord: Coord) -> Option<&Square> {
        if coord.is_on_board() {
            self.squares.get(coord.index())
        } else {
            None
        }
    }

    /// True if the square is on the board and unoccupied.
    #[must_use]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.square(coord).is_some_and(|s| s.occupant.is_none())
    }

    #[must_use]
    pub fn is_valid_position(&self, coord: Coord) -> bool {
        coord.is_on_board()
    }

    #[must_use]
    pub fn is_temple(&self, coord: Coord) -> bool {
        self.square(coord).is_some_and(Square::is_temple)
    }

    /// Owner of the temple on `coord`, if it is a temple.
    #[must_use]
    pub fn temple_owner(&self, coord: Coord) -> Option<Player> {
        self.square(coord).and_then(|s| s.temple)
    }

    /// Location of a player's Master, or `None` once it has been captured.
    #[must_use]
    pub fn find_master(&self, player: Player) -> Option<Coord> {
        self.pieces()
            .find(|p| p.owner == player && p.is_master())
            .map(|p| p.coord)
    }

    /// Every piece still on the board, in arena order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }

    /// A player's pieces, in arena order.
    pub fn player_pieces(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner == player)
    }

    /// Number of pieces a player has left.
    #[must_use]
    pub fn piece_count(&self, player: Player) -> usize {
        self.player_pieces(player).count()
    }

    fn monk_count(&self, player: Player) -> usize {
        self.player_pieces(player).filter(|p| !p.is_master()).count()
    }

    /// Occupancy grid for renderers, indexed `[row][col]`.
    #[must_use]
    pub fn occupancy(&self) -> [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut grid = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for piece in self.pieces() {
            grid[piece.coord.row as usize][piece.coord.col as usize] = Some(*piece);
        }
        grid
    }

    // === Invariants ===

    /// Check every structural invariant.
    ///
    /// Used to reject externally supplied boards (save files, custom setups).
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |msg: String| Err(EngineError::CorruptSave(msg));

        if self.squares.len() != SQUARE_COUNT {
            return fail(format!("board has {} squares", self.squares.len()));
        }
        if self.pieces.len() > u8::MAX as usize {
            return fail("piece arena too large".to_string());
        }

        for coord in Coord::all() {
            let expected = Player::ALL.into_iter().find(|p| p.home_temple() == coord);
            if self.squares[coord.index()].temple != expected {
                return fail(format!("temple marker mismatch at {coord}"));
            }
            if let Some(id) = self.squares[coord.index()].occupant {
                match self.piece(id) {
                    Some(piece) if piece.coord == coord => {}
                    _ => return fail(format!("square {coord} references a missing or misplaced piece")),
                }
            }
        }

        for (index, piece) in self.pieces.iter().enumerate() {
            let Some(piece) = piece else { continue };
            if !piece.coord.is_on_board() {
                return fail(format!("piece off the board at {}", piece.coord));
            }
            if self.squares[piece.coord.index()].occupant != Some(PieceId(index as u8)) {
                return fail(format!("piece at {} not referenced by its square", piece.coord));
            }
        }

        for player in Player::ALL {
            let masters = self.player_pieces(player).filter(|p| p.is_master()).count();
            let monks = self.monk_count(player);
            if masters > 1 {
                return fail(format!("{player} has {masters} Masters"));
            }
            if monks > MAX_MONKS {
                return fail(format!("{player} has {monks} Monks"));
            }
        }

        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(self.validate(), Ok(()), "board invariant violated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::new();

        for player in Player::ALL {
            assert_eq!(board.piece_count(player), 5);
            assert_eq!(board.find_master(player), Some(player.home_temple()));
        }

        let monk = board.piece_at(Coord::new(4, 0)).unwrap();
        assert_eq!(monk.kind, PieceKind::Monk);
        assert_eq!(monk.owner, Player::One);

        for row in 1..4 {
            for col in 0..5 {
                assert!(board.is_empty(Coord::new(row, col)));
            }
        }
    }

    #[test]
    fn test_temples() {
        let board = Board::new();
        let temples: Vec<_> = Coord::all().filter(|&c| board.is_temple(c)).collect();

        assert_eq!(temples, vec![Coord::new(0, 2), Coord::new(4, 2)]);
        assert_eq!(board.temple_owner(Coord::new(4, 2)), Some(Player::One));
        assert_eq!(board.temple_owner(Coord::new(0, 2)), Some(Player::Two));
        assert!(!board.is_temple(Coord::new(9, 9)));
    }

    #[test]
    fn test_place_piece_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::empty();
        board.place_piece(PieceKind::Monk, Player::One, Coord::new(2, 2)).unwrap();
        let before = board.clone();

        assert_eq!(
            board.place_piece(PieceKind::Monk, Player::Two, Coord::new(2, 2)),
            Err(EngineError::Occupied(Coord::new(2, 2)))
        );
        assert_eq!(
            board.place_piece(PieceKind::Monk, Player::Two, Coord::new(5, 2)),
            Err(EngineError::OutOfBounds(Coord::new(5, 2)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_second_master_rejected() {
        let mut board = Board::empty();
        board.place_piece(PieceKind::Master, Player::One, Coord::new(2, 2)).unwrap();

        assert_eq!(
            board.place_piece(PieceKind::Master, Player::One, Coord::new(3, 3)),
            Err(EngineError::DuplicateMaster(Player::One))
        );
        assert!(board.place_piece(PieceKind::Master, Player::Two, Coord::new(3, 3)).is_ok());
    }

    #[test]
    fn test_place_fifth_monk_rejected() {
        let mut board = Board::empty();
        for col in 0..4 {
            board.place_piece(PieceKind::Monk, Player::Two, Coord::new(1, col)).unwrap();
        }

        assert_eq!(
            board.place_piece(PieceKind::Monk, Player::Two, Coord::new(2, 0)),
            Err(EngineError::PieceLimit(Player::Two))
        );
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::new();
        let captured = board.move_piece(Coord::new(4, 0), Coord::new(3, 0)).unwrap();

        assert!(captured.is_none());
        assert!(board.is_empty(Coord::new(4, 0)));
        assert_eq!(board.piece_at(Coord::new(3, 0)).unwrap().coord, Coord::new(3, 0));
    }

    #[test]
    fn test_move_captures_opponent() {
        let mut board = Board::empty();
        board.place_piece(PieceKind::Monk, Player::One, Coord::new(2, 2)).unwrap();
        board.place_piece(PieceKind::Master, Player::Two, Coord::new(1, 2)).unwrap();

        let captured = board.move_piece(Coord::new(2, 2), Coord::new(1, 2)).unwrap();

        let captured = captured.unwrap();
        assert_eq!(captured.kind, PieceKind::Master);
        assert_eq!(captured.owner, Player::Two);
        assert_eq!(board.find_master(Player::Two), None);
        assert_eq!(board.piece_count(Player::Two), 0);
    }

    #[test]
    fn test_move_failures_leave_board_unchanged() {
        let mut board = Board::new();
        let before = board.clone();

        assert_eq!(
            board.move_piece(Coord::new(2, 2), Coord::new(1, 2)),
            Err(EngineError::EmptySquare(Coord::new(2, 2)))
        );
        assert_eq!(
            board.move_piece(Coord::new(4, 0), Coord::new(5, 0)),
            Err(EngineError::OutOfBounds(Coord::new(5, 0)))
        );
        assert_eq!(
            board.move_piece(Coord::new(4, 0), Coord::new(4, 1)),
            Err(EngineError::Occupied(Coord::new(4, 1)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_piece() {
        let mut board = Board::new();
        let removed = board.remove_piece(Coord::new(0, 2)).unwrap();

        assert!(removed.is_master());
        assert_eq!(board.find_master(Player::Two), None);
        assert_eq!(
            board.remove_piece(Coord::new(0, 2)),
            Err(EngineError::EmptySquare(Coord::new(0, 2)))
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut board = Board::new();
        board.move_piece(Coord::new(4, 2), Coord::new(2, 2)).unwrap();
        board.remove_piece(Coord::new(0, 0)).unwrap();

        board.reset();
        let once = board.clone();
        board.reset();

        assert_eq!(board, once);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_occupancy_grid() {
        let board = Board::new();
        let grid = board.occupancy();

        assert_eq!(grid[4][2].unwrap().kind, PieceKind::Master);
        assert_eq!(grid[0][4].unwrap().owner, Player::Two);
        assert!(grid[2][2].is_none());
    }

    #[test]
    fn test_validate_detects_inconsistency() {
        let mut board = Board::new();
        assert_eq!(board.validate(), Ok(()));

        board.squares[Coord::new(2, 2).index()].occupant = Some(PieceId(0));
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut board = Board::new();
        board.move_piece(Coord::new(4, 1), Coord::new(2, 1)).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, restored);
    }
}
