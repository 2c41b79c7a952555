//! Checks that hold for any position reached in random play.

use draughts_core::board::Board;
use draughts_core::color::Color;
use draughts_core::move_guard::MoveGuard;
use draughts_core::move_list::{MoveList, any_capture_available};
use draughts_core::search::{Continuation, Search};
use rand::seq::IteratorRandom;

const GAMES: usize = 20;
const MAX_PLIES: usize = 120;

/// One position visited during a random game.
struct Visit {
    board: Board,
    side_to_move: Color,
    continuation: Continuation,
}

/// Plays random games on the given board shape and collects every position
/// seen along the way.
fn random_positions(size: usize, rows_filled: usize) -> Vec<Visit> {
    let mut rng = rand::rng();
    let mut visits = Vec::new();

    for _ in 0..GAMES {
        let mut board = Board::new(size, rows_filled).unwrap();
        let mut side_to_move = Color::White;
        let mut continuation = Continuation::Free;

        for _ in 0..MAX_PLIES {
            let moves = match continuation {
                Continuation::Free => MoveList::new(&board, side_to_move),
                Continuation::From(from) => MoveList::continuation(&board, from),
            };
            visits.push(Visit {
                board: board.clone(),
                side_to_move,
                continuation,
            });

            let Some(&mv) = moves.iter().choose(&mut rng) else {
                break;
            };
            let is_capture = board.captures_exactly_one(mv.from, mv.to);
            board.apply_move(mv);

            if is_capture && board.can_capture(mv.to) {
                continuation = Continuation::From(mv.to);
            } else {
                continuation = Continuation::Free;
                side_to_move = side_to_move.opposite();
            }
        }
    }
    visits
}

#[test]
fn test_capture_is_mandatory() {
    for visit in random_positions(8, 3) {
        let moves = MoveList::new(&visit.board, visit.side_to_move);
        let must_capture = any_capture_available(&visit.board, visit.side_to_move);

        assert_eq!(moves.is_capture(), must_capture);
        for mv in &moves {
            assert!(visit.board.is_legal_move(mv.from, mv.to), "{mv} on\n{}", visit.board);
            assert_eq!(
                visit.board.captures_exactly_one(mv.from, mv.to),
                must_capture,
                "{mv} on\n{}",
                visit.board
            );
        }
    }
}

#[test]
fn test_apply_then_undo_restores_board() {
    for visit in random_positions(6, 2) {
        let mut board = visit.board.clone();
        for &mv in &MoveList::new(&visit.board, visit.side_to_move) {
            let undo = board.apply_move(mv);
            assert_eq!(board.get(mv.from), None);
            assert!(board.get(mv.to).is_some());
            board.undo_move(&undo);
            assert_eq!(board, visit.board);
        }
    }
}

#[test]
fn test_move_guard_restores_board() {
    for visit in random_positions(6, 2) {
        let mut board = visit.board.clone();
        for &mv in &MoveList::new(&visit.board, visit.side_to_move) {
            {
                let guard = MoveGuard::new(&mut board, mv);
                assert_ne!(*guard, visit.board);
            }
            assert_eq!(board, visit.board);
        }
    }
}

#[test]
fn test_search_leaves_board_unchanged() {
    let mut search = Search::new();
    for visit in random_positions(6, 2).into_iter().step_by(7) {
        let mut board = visit.board.clone();
        let result = search.run_from(&mut board, visit.side_to_move, 3, visit.continuation);
        assert_eq!(board, visit.board);

        let moves = match visit.continuation {
            Continuation::Free => MoveList::new(&visit.board, visit.side_to_move),
            Continuation::From(from) => MoveList::continuation(&visit.board, from),
        };
        match result.best_move {
            Some(mv) => assert!(moves.contains(mv)),
            None => assert!(moves.is_empty()),
        }
    }
}

#[test]
fn test_men_are_crowned_on_arrival() {
    for visit in random_positions(8, 3) {
        for color in [Color::White, Color::Black] {
            let row = color.promotion_row(visit.board.size());
            assert!(
                visit.board.pieces(color).all(|(pos, piece)| pos.row != row || piece.is_king),
                "uncrowned {color} man on\n{}",
                visit.board
            );
        }
    }
}
