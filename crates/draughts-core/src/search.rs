//! Game tree search engine.
//!
//! A plain fixed-depth negamax over the full move list. The board is searched
//! in place: every move is applied through a [`MoveGuard`] which takes it back
//! when the branch returns, so the caller gets its board back unchanged.

pub mod search_result;

use tracing::debug;

use crate::board::Board;
use crate::color::Color;
use crate::eval::evaluate;
use crate::move_guard::MoveGuard;
use crate::move_list::{Move, MoveList};
use crate::position::Position;
use crate::search::search_result::SearchResult;
use crate::types::{Depth, Score};

/// Which moves a search node may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Any legal move of the side to move.
    Free,
    /// Only further captures by the piece standing on this cell.
    From(Position),
}

/// Main search engine structure.
#[derive(Debug, Default)]
pub struct Search {
    n_nodes: u64,
}

impl Search {
    /// Creates a new search engine.
    pub fn new() -> Search {
        Search::default()
    }

    /// Resets the search state for a new game.
    pub fn init(&mut self) {
        self.n_nodes = 0;
    }

    /// Number of nodes visited by the last search.
    pub fn n_nodes(&self) -> u64 {
        self.n_nodes
    }

    /// Searches for the best move of `side_to_move`.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to search. It is mutated during the search and
    ///   restored before this returns.
    /// * `side_to_move` - The side choosing a move.
    /// * `depth` - Number of moves to look ahead.
    pub fn run(&mut self, board: &mut Board, side_to_move: Color, depth: Depth) -> SearchResult {
        self.run_from(board, side_to_move, depth, Continuation::Free)
    }

    /// Searches for the best move, optionally restricted to continuing a
    /// capture chain.
    ///
    /// # Returns
    ///
    /// A [`SearchResult`] whose `best_move` is `None` when the side to move has
    /// no candidate move. Among equally scored moves the first one in
    /// generation order is chosen.
    pub fn run_from(
        &mut self,
        board: &mut Board,
        side_to_move: Color,
        depth: Depth,
        continuation: Continuation,
    ) -> SearchResult {
        self.n_nodes = 0;
        let (best_move, score) = self.negamax(board, side_to_move, depth, continuation);

        debug!(
            side = %side_to_move,
            depth,
            score,
            nodes = self.n_nodes,
            best_move = ?best_move.map(|mv| mv.to_string()),
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            n_nodes: self.n_nodes,
            depth,
        }
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        side_to_move: Color,
        depth: Depth,
        continuation: Continuation,
    ) -> (Option<Move>, Score) {
        self.n_nodes += 1;

        if depth == 0 {
            return (None, evaluate(board, side_to_move));
        }

        let moves = match continuation {
            Continuation::Free => MoveList::new(board, side_to_move),
            Continuation::From(from) => MoveList::continuation(board, from),
        };
        if moves.is_empty() {
            return (None, evaluate(board, side_to_move));
        }

        let mut best: Option<(Move, Score)> = None;

        for &mv in moves.iter() {
            // Decided on the board before the move.
            let is_capture = board.captures_exactly_one(mv.from, mv.to);

            let mut next = MoveGuard::new(board, mv);
            let score = if is_capture && next.can_capture(mv.to) {
                // The same player keeps capturing; a chain never ends at a leaf.
                let (_, score) = self.negamax(
                    &mut next,
                    side_to_move,
                    (depth - 1).max(1),
                    Continuation::From(mv.to),
                );
                score
            } else {
                let (_, score) =
                    self.negamax(&mut next, side_to_move.opposite(), depth - 1, Continuation::Free);
                -score
            };
            drop(next);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, evaluate(board, side_to_move)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_depth_zero_returns_evaluation() {
        let mut board = board("----\n-b--\n--w-\n---W");
        let before = board.clone();

        let mut search = Search::new();
        let result = search.run(&mut board, Color::White, 0);

        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&before, Color::White));
        assert_eq!(result.n_nodes, 1);
        assert_eq!(board, before);
    }

    #[test]
    fn test_no_moves_returns_evaluation() {
        let mut board = board("w-\n--");
        let result = Search::new().run(&mut board, Color::White, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_takes_free_piece() {
        let mut board = board("----\n-b--\n--w-\n----");
        let before = board.clone();

        let result = Search::new().run(&mut board, Color::White, 2);

        assert_eq!(
            result.best_move,
            Some(Move::new(Position::new(2, 2), Position::new(0, 0)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_ties_keep_first_move() {
        // Both quiet steps leave the material unchanged at depth 1.
        let mut board = board("----\n----\n-w--\n----");
        let result = Search::new().run(&mut board, Color::White, 1);

        assert_eq!(
            result.best_move,
            Some(Move::new(Position::new(2, 1), Position::new(1, 2)))
        );
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_chain_continuation_is_scored_as_one_turn() {
        // White jumps d5 landing on c4, then must jump b3 as well.
        let mut board = board(
            "------\n\
             ------\n\
             -b----\n\
             ------\n\
             ---b--\n\
             ----w-",
        );
        let before = board.clone();

        let result = Search::new().run(&mut board, Color::White, 1);

        assert_eq!(
            result.best_move,
            Some(Move::new(Position::new(5, 4), Position::new(3, 2)))
        );
        // After the first jump the chain continues at depth 1 before evaluating.
        assert_eq!(result.score, 1);
        assert_eq!(board, before);
    }

    #[test]
    fn test_restricted_to_chain_piece() {
        let mut board = board(
            "------\n\
             ------\n\
             ---b--\n\
             ------\n\
             -b-b--\n\
             w-w---",
        );
        let result = Search::new().run_from(
            &mut board,
            Color::White,
            2,
            Continuation::From(Position::new(5, 2)),
        );
        assert_eq!(result.source(), Some(Position::new(5, 2)));
    }
}
