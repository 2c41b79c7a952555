//! Error types for board setup, notation parsing, and game configuration.
//!
//! Illegal moves chosen by a player are not errors: the turn state machine
//! simply discards them. Contract violations inside the rules engine, such as
//! asking for the direction between two cells that do not share a diagonal,
//! are reported as panics by the functions that detect them.

use thiserror::Error;

use crate::position::Position;

/// Errors that can occur while configuring or driving a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two cells were expected to lie on a common diagonal.
    #[error("positions {start} and {finish} do not share a diagonal")]
    NotDiagonal { start: Position, finish: Position },

    /// A position lies outside the board.
    #[error("position {position} is outside the {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },

    /// The requested board dimensions cannot hold the initial layout.
    #[error("invalid board configuration: size {size} with {rows_filled} filled rows per side")]
    InvalidBoardConfig { size: usize, rows_filled: usize },

    /// A textual board could not be parsed.
    #[error("invalid board: {message}")]
    InvalidBoard { message: String },

    /// A textual position could not be parsed.
    #[error("invalid position: {0:?}")]
    InvalidPosition(String),

    /// Game mode outside the known set.
    #[error("unknown game mode: {0}")]
    UnknownGameMode(String),

    /// Player type outside the known set.
    #[error("unknown player type: {0}")]
    UnknownPlayer(String),

    /// Difficulty level outside the known set.
    #[error("unknown level: {0}")]
    UnknownLevel(String),
}

/// Result type alias for draughts operations.
pub type Result<T> = std::result::Result<T, Error>;
