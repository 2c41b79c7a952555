use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell on the board, addressed by zero-based row and column.
///
/// Row 0 is the top edge of the board, which is where White pieces are
/// crowned. In text form a position is written as a column letter followed
/// by a one-based row number, so the layout reads like this on an 8x8 board:
///
/// ```text
///     a  b  c  d  e  f  g  h
/// 1  00 01 02 03 04 05 06 07
/// 2  10 11 12 13 14 15 16 17
/// ...
/// 8  70 71 72 73 74 75 76 77
/// ```
///
/// `"b3"` is therefore row 2, column 1. The numeric form `"2,1"` is accepted
/// as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Unit step along one of the four diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: isize,
    pub d_col: isize,
}

/// The four diagonal directions, in the order jumps are tried.
pub const DIAGONALS: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

impl Direction {
    const fn new(d_row: isize, d_col: isize) -> Direction {
        Direction { d_row, d_col }
    }

    /// Computes the unit step from `start` toward `finish`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDiagonal`] if the positions are identical or do not
    /// share a diagonal.
    pub fn between(start: Position, finish: Position) -> Result<Direction> {
        if !start.is_diagonal_to(finish) {
            return Err(Error::NotDiagonal { start, finish });
        }
        let d_row = if finish.row > start.row { 1 } else { -1 };
        let d_col = if finish.col > start.col { 1 } else { -1 };
        Ok(Direction::new(d_row, d_col))
    }
}

/// Returns the unit step along the diagonal from `start` toward `finish`.
///
/// # Panics
///
/// Panics if `start == finish` or the segment is not diagonal. Both indicate a
/// bug in the caller, which is expected to have validated the geometry.
pub fn direction(start: Position, finish: Position) -> Direction {
    Direction::between(start, finish).unwrap_or_else(|err| panic!("{err}"))
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Checks whether the position lies on a board of the given size.
    #[inline]
    pub fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Number of rows between two positions.
    #[inline]
    pub fn row_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row)
    }

    /// Checks whether `other` is a different cell on one of this cell's diagonals.
    #[inline]
    pub fn is_diagonal_to(self, other: Position) -> bool {
        self != other && self.row.abs_diff(other.row) == self.col.abs_diff(other.col)
    }

    /// Returns the neighbouring cell in `dir`, or `None` if it falls off the board.
    #[inline]
    pub fn step(self, dir: Direction, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(dir.d_row)?;
        let col = self.col.checked_add_signed(dir.d_col)?;
        let next = Position::new(row, col);
        next.is_within(size).then_some(next)
    }

    /// Iterates over the cells strictly between `self` and `finish`.
    ///
    /// # Panics
    ///
    /// Panics if the two positions do not share a diagonal.
    pub fn path_to(self, finish: Position) -> Path {
        let dir = direction(self, finish);
        Path {
            current: self,
            finish,
            dir,
        }
    }
}

/// Iterator over the interior cells of a diagonal segment.
pub struct Path {
    current: Position,
    finish: Position,
    dir: Direction,
}

impl Iterator for Path {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        // The segment is diagonal, so these never underflow before `finish`.
        let row = self.current.row.checked_add_signed(self.dir.d_row)?;
        let col = self.current.col.checked_add_signed(self.dir.d_col)?;
        let next = Position::new(row, col);
        if next == self.finish {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "{},{}", self.row, self.col)
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parses `"b3"`-style notation or a numeric `"row,col"` pair.
    fn from_str(s: &str) -> Result<Position> {
        let s = s.trim();
        let invalid = || Error::InvalidPosition(s.to_string());

        if let Some((row, col)) = s.split_once(',') {
            let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
            let col = col.trim().parse::<usize>().map_err(|_| invalid())?;
            return Ok(Position::new(row, col));
        }

        let mut chars = s.chars();
        let file = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return Err(invalid());
        }
        let rank = chars.as_str().parse::<usize>().map_err(|_| invalid())?;
        if rank == 0 {
            return Err(invalid());
        }
        Ok(Position::new(rank - 1, (file as u8 - b'a') as usize))
    }
}
