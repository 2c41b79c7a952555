//! Draughts board representation and move legality.
//!
//! The board is the only place where the rules of the game live. Every
//! predicate here looks at nothing but the piece standing on the start cell
//! and the contents of the grid.

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_ROWS_FILLED, MAX_BOARD_SIZE, MAX_DESTINATIONS, MIN_BOARD_SIZE,
};
use crate::error::{Error, Result};
use crate::move_list::Move;
use crate::piece::Piece;
use crate::position::{DIAGONALS, Position};

/// Destination cells reachable by a single piece.
pub type Destinations = ArrayVec<Position, MAX_DESTINATIONS>;

/// Outcome of scanning the cells between two positions on a diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScan {
    /// A piece of the mover's own color stands in the way.
    Blocked,
    /// Number of enemy pieces met along the way.
    Enemies(usize),
}

/// Everything needed to take back a move made with [`Board::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    /// The move that was applied.
    pub mv: Move,
    /// The moving piece as it stood before the move (before any promotion).
    pub piece: Piece,
    /// The captured piece and the cell it was removed from, if any.
    pub captured: Option<(Position, Piece)>,
}

/// Represents an N x N draughts board.
///
/// Cells are stored row-major. Each cell either holds exactly one piece or is
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    /// Creates the standard 8x8 board with three filled rows per side.
    fn default() -> Self {
        Board::with_layout(DEFAULT_BOARD_SIZE, DEFAULT_ROWS_FILLED)
    }
}

impl Board {
    /// Creates a board in its initial layout.
    ///
    /// Black fills the dark cells (`(row + col)` odd) of the first
    /// `rows_filled` rows and White the dark cells of the last `rows_filled`
    /// rows. All other cells start empty.
    ///
    /// # Arguments
    ///
    /// * `size` - Side length of the board.
    /// * `rows_filled` - Number of rows each side fills.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardConfig`] if the size is out of range or the
    /// two sides' rows would overlap.
    pub fn new(size: usize, rows_filled: usize) -> Result<Board> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) || size < 2 * rows_filled {
            return Err(Error::InvalidBoardConfig { size, rows_filled });
        }
        Ok(Board::with_layout(size, rows_filled))
    }

    /// Creates a board with no pieces on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardConfig`] if the size is out of range.
    pub fn empty(size: usize) -> Result<Board> {
        Board::new(size, 0)
    }

    fn with_layout(size: usize, rows_filled: usize) -> Board {
        let mut cells = vec![None; size * size];
        for row in 0..size {
            for col in 0..size {
                if (row + col) % 2 == 0 {
                    continue;
                }
                let color = if row < rows_filled {
                    Color::Black
                } else if row >= size - rows_filled {
                    Color::White
                } else {
                    continue;
                };
                cells[row * size + col] = Some(Piece::man(color));
            }
        }
        Board { size, cells }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether a position lies on this board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Checks that a position lies on this board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if it does not.
    pub fn check(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(Error::OutOfBounds {
                position: pos,
                size: self.size,
            })
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside the {0}x{0} board",
            self.size
        );
        pos.row * self.size + pos.col
    }

    /// Returns the piece on a cell, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[self.index(pos)]
    }

    /// Replaces the contents of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board.
    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        let idx = self.index(pos);
        self.cells[idx] = piece;
    }

    /// Removes and returns the piece on a cell.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Iterates over the pieces of one color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.positions().filter_map(move |pos| {
            self.get(pos)
                .filter(|piece| piece.color == color)
                .map(|piece| (pos, piece))
        })
    }

    /// Number of pieces of one color on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|piece| piece.color == color)
            .count()
    }

    /// Scans the cells strictly between `start` and `finish`.
    ///
    /// The scan stops at the first piece of the mover's own color. An empty
    /// start cell has no mover and reports [`PathScan::Blocked`].
    ///
    /// # Panics
    ///
    /// Panics if the two positions do not share a diagonal.
    pub fn enemies_on_path(&self, start: Position, finish: Position) -> PathScan {
        let Some(mover) = self.get(start) else {
            return PathScan::Blocked;
        };

        let mut enemies = 0;
        for pos in start.path_to(finish) {
            match self.get(pos) {
                Some(piece) if piece.color == mover.color => return PathScan::Blocked,
                Some(_) => enemies += 1,
                None => {}
            }
        }
        PathScan::Enemies(enemies)
    }

    /// Checks whether moving from `start` to `finish` jumps exactly one enemy.
    ///
    /// The destination must be empty and on a diagonal of the start cell.
    pub fn captures_exactly_one(&self, start: Position, finish: Position) -> bool {
        start.is_diagonal_to(finish)
            && self.get(finish).is_none()
            && self.enemies_on_path(start, finish) == PathScan::Enemies(1)
    }

    /// Checks whether the piece on `start` may move to `finish`.
    ///
    /// An ordinary piece steps one cell forward or jumps exactly one enemy two
    /// cells away, in any direction. A king glides any distance along a clear
    /// diagonal or jumps a single enemy with any number of empty cells on
    /// either side of it.
    ///
    /// # Returns
    ///
    /// `false` if `start` is empty.
    pub fn is_legal_move(&self, start: Position, finish: Position) -> bool {
        let Some(piece) = self.get(start) else {
            return false;
        };
        if self.get(finish).is_some() || !start.is_diagonal_to(finish) {
            return false;
        }

        if piece.is_king {
            return self.captures_exactly_one(start, finish)
                || self.enemies_on_path(start, finish) == PathScan::Enemies(0);
        }

        match start.row_distance(finish) {
            1 => finish.row as isize - start.row as isize == piece.color.forward(),
            2 => self.captures_exactly_one(start, finish),
            _ => false,
        }
    }

    /// Checks whether the move is legal and captures exactly one enemy.
    pub fn is_legal_capture(&self, start: Position, finish: Position) -> bool {
        self.is_legal_move(start, finish) && self.captures_exactly_one(start, finish)
    }

    /// Lists every legal destination of the piece on `start`.
    ///
    /// Candidates are visited row by row from the top edge. Within a row the
    /// cell at `col + (row - target_row)` comes first.
    pub fn legal_destinations(&self, start: Position) -> Destinations {
        let mut destinations = Destinations::new();
        let size = self.size as isize;
        let (row, col) = (start.row as isize, start.col as isize);

        for target_row in 0..size {
            let offset = row - target_row;
            for target_col in [col + offset, col - offset] {
                if !(0..size).contains(&target_col) {
                    continue;
                }
                let finish = Position::new(target_row as usize, target_col as usize);
                if self.is_legal_move(start, finish) {
                    destinations.push(finish);
                }
            }
        }
        destinations
    }

    /// Lists the legal destinations of the piece on `start` that capture.
    pub fn legal_capture_destinations(&self, start: Position) -> Destinations {
        self.legal_destinations(start)
            .into_iter()
            .filter(|&finish| self.captures_exactly_one(start, finish))
            .collect()
    }

    /// Checks whether the piece on `start` has a capture available.
    ///
    /// Ordinary pieces only need the four short jumps checked, which keeps the
    /// whole-board mandatory capture scan cheap.
    ///
    /// # Returns
    ///
    /// `false` if `start` is empty.
    pub fn can_capture(&self, start: Position) -> bool {
        let Some(piece) = self.get(start) else {
            return false;
        };

        if piece.is_king {
            return !self.legal_capture_destinations(start).is_empty();
        }

        DIAGONALS.iter().any(|&dir| {
            let Some(over) = start.step(dir, self.size) else {
                return false;
            };
            let Some(landing) = over.step(dir, self.size) else {
                return false;
            };
            self.get(landing).is_none()
                && self
                    .get(over)
                    .is_some_and(|victim| victim.color != piece.color)
        })
    }

    /// Finds the occupied cell strictly between `start` and `finish`.
    ///
    /// # Returns
    ///
    /// The first occupied cell on the path, or `None` if the path is clear.
    pub fn piece_to_capture(&self, start: Position, finish: Position) -> Option<Position> {
        start.path_to(finish).find(|&pos| self.get(pos).is_some())
    }

    /// Moves a piece, removing any jumped piece and crowning it if it reaches
    /// its farthest row.
    ///
    /// No legality check is made; the caller must have validated the move.
    ///
    /// # Returns
    ///
    /// An [`Undo`] record that [`Board::undo_move`] uses to restore the board.
    ///
    /// # Panics
    ///
    /// Panics if the source cell is empty.
    pub fn apply_move(&mut self, mv: Move) -> Undo {
        let captured = self
            .piece_to_capture(mv.from, mv.to)
            .and_then(|pos| self.take(pos).map(|piece| (pos, piece)));

        let Some(piece) = self.take(mv.from) else {
            panic!("no piece on {} to move", mv.from);
        };
        let landed = if mv.to.row == piece.color.promotion_row(self.size) {
            piece.promoted()
        } else {
            piece
        };
        self.set(mv.to, Some(landed));

        Undo {
            mv,
            piece,
            captured,
        }
    }

    /// Reverses a move made with [`Board::apply_move`].
    pub fn undo_move(&mut self, undo: &Undo) {
        self.set(undo.mv.from, Some(undo.piece));
        self.set(undo.mv.to, None);
        if let Some((pos, piece)) = undo.captured {
            self.set(pos, Some(piece));
        }
    }
}

impl fmt::Display for Board {
    /// Writes one line per row: `-` for an empty cell, `w`/`b` for ordinary
    /// pieces and `W`/`B` for kings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                let c = cell.map_or('-', Piece::to_char);
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses the format written by `Display`. Blank lines and whitespace
    /// inside a row are ignored, and `.` is accepted for an empty cell.
    fn from_str(s: &str) -> Result<Board> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(Error::InvalidBoard {
                message: format!("{size} rows, expected {MIN_BOARD_SIZE} to {MAX_BOARD_SIZE}"),
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != size {
                return Err(Error::InvalidBoard {
                    message: format!("row {} has {} cells, expected {size}", row + 1, chars.len()),
                });
            }
            for &c in chars {
                let cell = match c {
                    '-' | '.' => None,
                    _ => Some(Piece::from_char(c).ok_or_else(|| Error::InvalidBoard {
                        message: format!("unexpected character {c:?} in row {}", row + 1),
                    })?),
                };
                cells.push(cell);
            }
        }

        Ok(Board { size, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::default();
        assert_eq!(board.size(), 8);
        assert_eq!(board.count(Color::White), 12);
        assert_eq!(board.count(Color::Black), 12);

        for pos in board.positions() {
            let piece = board.get(pos);
            if (pos.row + pos.col) % 2 == 0 || (3..5).contains(&pos.row) {
                assert_eq!(piece, None, "{pos} should be empty");
            } else if pos.row < 3 {
                assert_eq!(piece, Some(Piece::man(Color::Black)));
            } else {
                assert_eq!(piece, Some(Piece::man(Color::White)));
            }
        }
    }

    #[test]
    fn test_new_rejects_overlapping_rows() {
        assert_eq!(
            Board::new(4, 3),
            Err(Error::InvalidBoardConfig {
                size: 4,
                rows_filled: 3
            })
        );
        assert!(Board::new(1, 0).is_err());
        assert!(Board::new(27, 3).is_err());
        assert!(Board::new(6, 3).is_ok());
    }

    #[test]
    fn test_parse_and_display() {
        let text = "-b--\n----\n--W-\nw---";
        let parsed = board(text);
        assert_eq!(parsed.get(pos("b1")), Some(Piece::man(Color::Black)));
        assert_eq!(parsed.get(pos("c3")), Some(Piece::king(Color::White)));
        assert_eq!(parsed.to_string(), text);

        assert!("b-\n---".parse::<Board>().is_err());
        assert!("bx\n--".parse::<Board>().is_err());
    }

    #[test]
    fn test_check_bounds() {
        let board = Board::default();
        assert!(board.check(Position::new(7, 7)).is_ok());
        assert_eq!(
            board.check(Position::new(8, 0)),
            Err(Error::OutOfBounds {
                position: Position::new(8, 0),
                size: 8
            })
        );
    }

    #[test]
    fn test_enemies_on_path() {
        let board = board(
            "------\n\
             ------\n\
             --b---\n\
             ------\n\
             --b-b-\n\
             ---w--",
        );
        let white = Position::new(5, 3);
        assert_eq!(
            board.enemies_on_path(white, Position::new(3, 1)),
            PathScan::Enemies(1)
        );
        assert_eq!(
            board.enemies_on_path(white, Position::new(4, 2)),
            PathScan::Enemies(0)
        );
        // Black's own piece blocks it.
        assert_eq!(
            board.enemies_on_path(Position::new(2, 2), Position::new(5, 5)),
            PathScan::Blocked
        );
        assert_eq!(
            board.enemies_on_path(Position::new(0, 0), Position::new(2, 2)),
            PathScan::Blocked
        );
    }

    #[test]
    fn test_men_step_forward_only() {
        let board = board("----\n-b--\n--w-\n----");
        let white = Position::new(2, 2);
        assert!(board.is_legal_move(white, Position::new(1, 3)));
        assert!(!board.is_legal_move(white, Position::new(3, 1)));
        assert!(!board.is_legal_move(white, Position::new(3, 3)));
        // Occupied destination.
        assert!(!board.is_legal_move(white, Position::new(1, 1)));

        let black = Position::new(1, 1);
        assert!(board.is_legal_move(black, Position::new(2, 0)));
        assert!(!board.is_legal_move(black, Position::new(0, 0)));
    }

    #[test]
    fn test_men_capture_backward() {
        let board = board("----\n-w--\n--b-\n----");
        let white = Position::new(1, 1);
        assert!(board.is_legal_move(white, Position::new(3, 3)));
        assert!(board.is_legal_capture(white, Position::new(3, 3)));
        assert!(board.can_capture(white));
    }

    #[test]
    fn test_men_cannot_travel_far() {
        let board = board("-----\n-----\n-----\n-----\n----w");
        assert!(!board.is_legal_move(Position::new(4, 4), Position::new(1, 1)));
        assert!(!board.is_legal_move(Position::new(4, 4), Position::new(2, 2)));
        assert!(board.is_legal_move(Position::new(4, 4), Position::new(3, 3)));
    }

    #[test]
    fn test_king_glides_and_captures_from_afar() {
        let board = board(
            "------\n\
             ------\n\
             ------\n\
             ---b--\n\
             ------\n\
             -W----",
        );
        let king = Position::new(5, 1);
        assert!(board.is_legal_move(king, Position::new(4, 2)));
        assert!(board.is_legal_move(king, Position::new(4, 0)));
        // Jumps the enemy on (3, 3) and lands anywhere beyond it.
        assert!(board.is_legal_capture(king, Position::new(2, 4)));
        assert!(board.is_legal_capture(king, Position::new(1, 5)));
        assert!(!board.is_legal_capture(king, Position::new(4, 2)));

        let captures = board.legal_capture_destinations(king);
        assert_eq!(
            captures.as_slice(),
            &[Position::new(1, 5), Position::new(2, 4)]
        );
        assert!(board.can_capture(king));
    }

    #[test]
    fn test_king_cannot_jump_two_enemies() {
        let board = board(
            "------\n\
             ------\n\
             ----b-\n\
             ---b--\n\
             ------\n\
             -W----",
        );
        let king = Position::new(5, 1);
        assert!(!board.is_legal_move(king, Position::new(1, 5)));
        assert!(!board.is_legal_capture(king, Position::new(1, 5)));
        assert!(!board.can_capture(king));
    }

    #[test]
    fn test_legal_destinations_order() {
        let board = board("----\n----\n-w--\n----");
        let start = Position::new(2, 1);
        assert_eq!(
            board.legal_destinations(start).as_slice(),
            &[Position::new(1, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_can_capture_requires_empty_landing() {
        let board = board("b---\n-w--\n----\n----");
        assert!(!board.can_capture(Position::new(1, 1)));
        assert!(board.can_capture(Position::new(0, 0)));
        assert!(!board.can_capture(Position::new(3, 3)));
    }

    #[test]
    fn test_piece_to_capture() {
        let board = board("----\n-b--\n--w-\n----");
        assert_eq!(
            board.piece_to_capture(Position::new(2, 2), Position::new(0, 0)),
            Some(Position::new(1, 1))
        );
        assert_eq!(
            board.piece_to_capture(Position::new(2, 2), Position::new(1, 3)),
            None
        );
    }

    #[test]
    fn test_apply_move_captures_and_promotes() {
        let mut board = board("----\n-b--\n--w-\n----");
        let undo = board.apply_move(Move::new(Position::new(2, 2), Position::new(0, 0)));

        assert_eq!(board.get(Position::new(0, 0)), Some(Piece::king(Color::White)));
        assert_eq!(board.get(Position::new(1, 1)), None);
        assert_eq!(board.get(Position::new(2, 2)), None);
        assert_eq!(undo.piece, Piece::man(Color::White));
        assert_eq!(
            undo.captured,
            Some((Position::new(1, 1), Piece::man(Color::Black)))
        );
    }

    #[test]
    fn test_black_promotes_on_last_row() {
        let mut board = board("----\n----\n-b--\n----");
        board.apply_move(Move::new(Position::new(2, 1), Position::new(3, 2)));
        assert_eq!(board.get(Position::new(3, 2)), Some(Piece::king(Color::Black)));
    }

    #[test]
    fn test_undo_restores_board() {
        let original = board("----\n-b--\n--w-\n----");
        let mut board = original.clone();

        let undo = board.apply_move(Move::new(Position::new(2, 2), Position::new(0, 0)));
        board.undo_move(&undo);
        assert_eq!(board, original);

        let undo = board.apply_move(Move::new(Position::new(2, 2), Position::new(1, 3)));
        assert_eq!(undo.captured, None);
        board.undo_move(&undo);
        assert_eq!(board, original);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        Board::default().get(Position::new(8, 0));
    }
}
