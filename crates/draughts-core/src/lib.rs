pub mod board;
pub mod color;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game_state;
pub mod level;
pub mod move_guard;
pub mod move_list;
pub mod perft;
pub mod piece;
pub mod position;
pub mod search;
pub mod types;

pub use error::{Error, Result};
