//! Material evaluation.

use crate::board::Board;
use crate::color::Color;
use crate::types::Score;

/// Computes the material balance from `color`'s point of view.
///
/// Each of `color`'s pieces adds its score (1, or 3 for a king) and each
/// opposing piece subtracts its score.
pub fn evaluate(board: &Board, color: Color) -> Score {
    board
        .positions()
        .filter_map(|pos| board.get(pos))
        .map(|piece| {
            if piece.color == color {
                piece.score()
            } else {
                -piece.score()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::default();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_kings_count_triple() {
        let board: Board = "W-b\n---\nb--".parse().unwrap();
        assert_eq!(evaluate(&board, Color::White), 1);
        assert_eq!(evaluate(&board, Color::Black), -1);
    }
}
