//! Search result types.

use crate::move_list::Move;
use crate::position::Position;
use crate::types::{Depth, Score};

/// Result of a search operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move, or `None` if the side to move had no legal move.
    pub best_move: Option<Move>,
    /// Score of the chosen move from the searching side's point of view.
    pub score: Score,
    /// Number of nodes visited.
    pub n_nodes: u64,
    /// Depth the search was started with.
    pub depth: Depth,
}

impl SearchResult {
    /// Source cell of the chosen move.
    pub fn source(&self) -> Option<Position> {
        self.best_move.map(|mv| mv.from)
    }

    /// Destination cell of the chosen move.
    pub fn destination(&self) -> Option<Position> {
        self.best_move.map(|mv| mv.to)
    }
}
