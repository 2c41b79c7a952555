use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{KING_SCORE, MAN_SCORE};
use crate::types::Score;

/// A single playing piece.
///
/// Two pieces compare equal when they share a color and a king status, so
/// pieces are freely interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    /// Creates an ordinary (uncrowned) piece.
    pub const fn man(color: Color) -> Piece {
        Piece {
            color,
            is_king: false,
        }
    }

    /// Creates a king.
    pub const fn king(color: Color) -> Piece {
        Piece {
            color,
            is_king: true,
        }
    }

    /// Returns this piece crowned.
    pub fn promoted(self) -> Piece {
        Piece::king(self.color)
    }

    /// Material value of the piece: 3 for a king, 1 otherwise.
    pub fn score(self) -> Score {
        if self.is_king { KING_SCORE } else { MAN_SCORE }
    }

    /// Converts the piece to its board character.
    ///
    /// # Returns
    ///
    /// * `'w'` / `'b'` for ordinary pieces
    /// * `'W'` / `'B'` for kings
    pub fn to_char(self) -> char {
        let c = self.color.to_char();
        if self.is_king {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Parses a board character produced by [`Piece::to_char`].
    ///
    /// # Returns
    ///
    /// `Some(Piece)` for `w`, `b`, `W` or `B`, `None` for anything else.
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'w' => Some(Piece::man(Color::White)),
            'b' => Some(Piece::man(Color::Black)),
            'W' => Some(Piece::king(Color::White)),
            'B' => Some(Piece::king(Color::Black)),
            _ => None,
        }
    }
}
