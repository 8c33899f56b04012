use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compass movement directions for player segments.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every direction, in a fixed order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns the designated reverse direction.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string names no known direction.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ParseDirectionError(raw.to_owned()))
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseDirectionError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Returns whether `next` may follow `previous` (no exact reversal).
///
/// An unset direction on either side never conflicts.
#[must_use]
pub fn direction_change_is_valid(previous: Option<Direction>, next: Option<Direction>) -> bool {
    match (previous, next) {
        (Some(previous), Some(next)) => next != previous.reverse(),
        _ => true,
    }
}
