//! Global constants

use crate::types::Score;

/// Side length of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Number of rows each side fills at the start of a standard game.
pub const DEFAULT_ROWS_FILLED: usize = 3;

/// Smallest board that still has a diagonal to move along.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board; columns are written with the letters `a` to `z`.
pub const MAX_BOARD_SIZE: usize = 26;

/// Upper bound on the diagonal candidates examined for a single piece.
pub const MAX_DESTINATIONS: usize = 2 * MAX_BOARD_SIZE;

/// Material value of an ordinary piece.
pub const MAN_SCORE: Score = 1;

/// Material value of a king.
pub const KING_SCORE: Score = 3;
