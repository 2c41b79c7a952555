//! Scoped move application.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Undo};
use crate::move_list::Move;

/// Applies a move to a borrowed board and takes it back when dropped.
///
/// The guard holds the only mutable borrow of the board, so the position
/// seen through it is the position after the move. Whatever path the caller
/// leaves by, the board is returned to the exact contents it had before
/// [`MoveGuard::new`].
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    undo: Undo,
}

impl<'a> MoveGuard<'a> {
    /// Applies `mv` to `board`.
    ///
    /// # Panics
    ///
    /// Panics if the source cell of `mv` is empty.
    pub fn new(board: &'a mut Board, mv: Move) -> MoveGuard<'a> {
        let undo = board.apply_move(mv);
        MoveGuard { board, undo }
    }

    /// Returns the record used to restore the board.
    pub fn undo(&self) -> &Undo {
        &self.undo
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.undo_move(&self.undo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::position::Position;

    #[test]
    fn test_guard_restores_on_drop() {
        let original: Board = "----\n-b--\n--w-\n----".parse().unwrap();
        let mut board = original.clone();

        {
            let mv = Move::new(Position::new(2, 2), Position::new(0, 0));
            let guard = MoveGuard::new(&mut board, mv);
            assert_eq!(guard.get(Position::new(0, 0)), Some(Piece::king(Color::White)));
            assert_eq!(guard.get(Position::new(1, 1)), None);
            assert!(guard.undo().captured.is_some());
        }

        assert_eq!(board, original);
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let original: Board = "-----\n-----\n--b--\n-----\nw---b".parse().unwrap();
        let mut board = original.clone();

        {
            let mut outer =
                MoveGuard::new(&mut board, Move::new(Position::new(4, 0), Position::new(3, 1)));
            let inner =
                MoveGuard::new(&mut outer, Move::new(Position::new(2, 2), Position::new(4, 0)));
            assert_eq!(inner.get(Position::new(3, 1)), None);
            assert_eq!(inner.get(Position::new(4, 0)), Some(Piece::king(Color::Black)));
        }

        assert_eq!(board, original);
    }
}
