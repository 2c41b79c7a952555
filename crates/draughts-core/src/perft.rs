use crate::board::Board;
use crate::color::Color;
use crate::move_guard::MoveGuard;
use crate::move_list::MoveList;
use crate::search::Continuation;
use crate::types::Depth;

/// Executes a perft run starting from the standard initial position.
///
/// # Arguments
///
/// * `depth` - Number of turns to expand from the initial position, White
///   moving first.
///
/// # Returns
///
/// The total leaf count of the move tree.
pub fn perft_root(depth: Depth) -> u64 {
    let mut board = Board::default();
    perft(&mut board, Color::White, depth)
}

/// Counts the leaves of the move tree below a position.
///
/// The jumps of a capture chain belong to one turn, so continuing a chain
/// does not use up depth; each distinct chain counts once. A position where
/// the side to move is stuck counts as a single leaf.
///
/// The board is restored before this returns.
pub fn perft(board: &mut Board, side_to_move: Color, depth: Depth) -> u64 {
    perft_from(board, side_to_move, depth, Continuation::Free)
}

fn perft_from(
    board: &mut Board,
    side_to_move: Color,
    depth: Depth,
    continuation: Continuation,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    let move_list = match continuation {
        Continuation::Free => MoveList::new(board, side_to_move),
        Continuation::From(from) => MoveList::continuation(board, from),
    };
    if move_list.is_empty() {
        return 1;
    }

    let mut nodes = 0;
    for &mv in move_list.iter() {
        let is_capture = board.captures_exactly_one(mv.from, mv.to);
        let mut next = MoveGuard::new(board, mv);

        nodes += if is_capture && next.can_capture(mv.to) {
            perft_from(&mut next, side_to_move, depth, Continuation::From(mv.to))
        } else {
            perft_from(&mut next, side_to_move.opposite(), depth - 1, Continuation::Free)
        };
    }
    nodes
}
