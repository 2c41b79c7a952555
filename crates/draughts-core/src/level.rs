//! Game difficulty levels and search depth configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Depth;

/// Represents a difficulty level of the computer player.
///
/// A level is nothing more than the fixed depth the search looks ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Level {
    /// All levels from the weakest to the strongest.
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Search depth used at this level.
    ///
    /// # Returns
    ///
    /// 3 for `Easy`, 4 for `Medium` and 5 for `Hard`.
    pub fn depth(self) -> Depth {
        match self {
            Level::Easy => 3,
            Level::Medium => 4,
            Level::Hard => 5,
        }
    }

    /// Returns the level searching to the given depth.
    pub fn from_depth(depth: Depth) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.depth() == depth)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Easy => write!(f, "easy"),
            Level::Medium => write!(f, "medium"),
            Level::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Accepts a level name or its search depth.
    fn from_str(s: &str) -> Result<Level> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" | "difficult" => Ok(Level::Hard),
            other => other
                .parse::<Depth>()
                .ok()
                .and_then(Level::from_depth)
                .ok_or_else(|| Error::UnknownLevel(s.to_string())),
        }
    }
}
