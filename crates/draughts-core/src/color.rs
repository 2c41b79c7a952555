use std::fmt;

use serde::{Deserialize, Serialize};

/// The two sides of a game.
///
/// White starts at the bottom of the board (the highest rows) and moves
/// toward row 0; Black starts at the top and moves toward the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite side.
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step an ordinary piece of this color takes when moving forward.
    ///
    /// # Returns
    ///
    /// * `-1` for `Color::White`
    /// * `1` for `Color::Black`
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the row on which a piece of this color is crowned.
    ///
    /// # Arguments
    ///
    /// * `size` - Side length of the board.
    pub fn promotion_row(self, size: usize) -> usize {
        match self {
            Color::White => 0,
            Color::Black => size - 1,
        }
    }

    /// Converts the color to the character used for its ordinary pieces.
    pub fn to_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
