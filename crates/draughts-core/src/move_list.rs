//! Move generation with the mandatory capture rule.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::color::Color;
use crate::position::Position;

/// Represents a single move of one piece along a diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The cell the piece leaves.
    pub from: Position,
    /// The cell the piece lands on.
    pub to: Position,
}

impl Move {
    /// Creates a new move.
    ///
    /// # Arguments
    ///
    /// * `from` - Source cell
    /// * `to` - Destination cell, on a diagonal of `from`
    #[inline]
    pub fn new(from: Position, to: Position) -> Move {
        debug_assert!(from.is_diagonal_to(to), "move {from}-{to} is not diagonal");
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Checks whether any piece of `color` has a capture available.
///
/// When this holds, the mandatory capture rule restricts the side to
/// capturing moves.
pub fn any_capture_available(board: &Board, color: Color) -> bool {
    board.pieces(color).any(|(pos, _)| board.can_capture(pos))
}

/// Container for the legal moves of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    /// Moves in board scan order.
    moves: Vec<Move>,
    /// Whether the list was restricted to captures.
    is_capture: bool,
}

impl MoveList {
    /// Generates all legal moves for `color`.
    ///
    /// If any capture is available only capturing moves are returned.
    /// Moves are ordered by source cell in row-major order, then by the
    /// candidate order of [`Board::legal_destinations`].
    ///
    /// # Arguments
    ///
    /// * `board` - The current position
    /// * `color` - The side to move
    pub fn new(board: &Board, color: Color) -> MoveList {
        let is_capture = any_capture_available(board, color);
        let mut moves = Vec::new();

        for (from, _) in board.pieces(color) {
            let destinations = if is_capture {
                board.legal_capture_destinations(from)
            } else {
                board.legal_destinations(from)
            };
            moves.extend(destinations.into_iter().map(|to| Move::new(from, to)));
        }

        MoveList { moves, is_capture }
    }

    /// Generates the captures that continue a chain from `from`.
    ///
    /// Only the piece on `from` may move; the player cannot switch pieces in
    /// the middle of a multi-capture.
    pub fn continuation(board: &Board, from: Position) -> MoveList {
        let moves = board
            .legal_capture_destinations(from)
            .into_iter()
            .map(|to| Move::new(from, to))
            .collect();

        MoveList {
            moves,
            is_capture: true,
        }
    }

    /// Returns the number of moves in the list.
    #[inline]
    pub fn count(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the side has no legal move.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns `true` if the list holds captures only.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.is_capture
    }

    /// Returns the first move in the list, if any exists.
    #[inline]
    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    /// Checks whether a move is in the list.
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Returns an iterator over all moves in generation order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
