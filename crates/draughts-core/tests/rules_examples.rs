use draughts_core::board::{Board, PathScan};
use draughts_core::color::Color;
use draughts_core::move_list::{Move, MoveList};
use draughts_core::piece::Piece;
use draughts_core::position::Position;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[test]
fn test_only_move_is_the_capture() {
    let mut board: Board = "----\n----\n-b--\n--w-".parse().unwrap();

    let moves = MoveList::new(&board, Color::White);
    assert_eq!(moves.iter().copied().collect::<Vec<_>>(), vec![Move::new(p(3, 2), p(1, 0))]);

    board.apply_move(Move::new(p(3, 2), p(1, 0)));
    assert_eq!(board.get(p(2, 1)), None);
    assert_eq!(board.get(p(3, 2)), None);
    assert_eq!(board.get(p(1, 0)), Some(Piece::man(Color::White)));
}

#[test]
fn test_long_king_capture() {
    let mut board = Board::empty(6).unwrap();
    board.set(p(2, 0), Some(Piece::king(Color::White)));
    board.set(p(1, 1), Some(Piece::man(Color::Black)));
    board.set(p(3, 1), Some(Piece::man(Color::Black)));

    // One enemy on the path: the king may land anywhere beyond it.
    assert!(board.is_legal_capture(p(2, 0), p(0, 2)));
    assert!(board.is_legal_capture(p(2, 0), p(4, 2)));
    assert!(board.is_legal_capture(p(2, 0), p(5, 3)));

    // A second piece on the same diagonal makes the jump illegal.
    board.set(p(4, 2), Some(Piece::man(Color::Black)));
    assert_eq!(board.enemies_on_path(p(2, 0), p(5, 3)), PathScan::Enemies(2));
    assert!(!board.is_legal_capture(p(2, 0), p(5, 3)));
    assert!(!board.is_legal_move(p(2, 0), p(5, 3)));

    // A friendly piece blocks outright.
    board.set(p(4, 2), Some(Piece::man(Color::White)));
    assert_eq!(board.enemies_on_path(p(2, 0), p(5, 3)), PathScan::Blocked);
    assert!(!board.is_legal_move(p(2, 0), p(5, 3)));
}

#[test]
fn test_promotion_happens_before_continuation() {
    // The man jumps onto the top row, is crowned, and as a king can capture
    // again along the long diagonal.
    let mut board: Board = "------\n-b----\nw---b-\n------\n------\n------".parse().unwrap();
    let mv = Move::new(p(2, 0), p(0, 2));
    assert!(board.is_legal_capture(mv.from, mv.to));

    board.apply_move(mv);
    assert_eq!(board.get(p(0, 2)), Some(Piece::king(Color::White)));
    assert!(board.can_capture(p(0, 2)));
    assert_eq!(board.legal_capture_destinations(p(0, 2)).as_slice(), &[p(3, 5)]);
}

#[test]
fn test_men_cannot_capture_two_in_a_row() {
    let board: Board = "-----\n-----\n--b--\n---b-\n----w".parse().unwrap();
    assert!(!board.is_legal_move(p(4, 4), p(1, 1)));
    assert!(!board.captures_exactly_one(p(4, 4), p(1, 1)));
    assert!(!board.can_capture(p(4, 4)));
}
