//! Common type aliases used throughout the engine.

/// Search depth, in moves of lookahead.
pub type Depth = u32;

/// Material score from the point of view of one side.
pub type Score = i32;
