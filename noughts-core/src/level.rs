//! Difficulty levels and the board size each one plays on

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Campaign level, 1..=10. Drives both board size and opponent strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(10);

    /// `None` outside 1..=10
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Level(value))
    }

    /// Clamp any integer into the valid range
    pub fn saturating(value: u8) -> Self {
        Level(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Following level, `None` at the top
    pub fn next(self) -> Option<Self> {
        Level::new(self.0 + 1)
    }

    /// Board edge for this level when the board grows with the campaign
    pub fn board_size(self) -> usize {
        (MIN_BOARD_SIZE + self.0 as usize - 1).min(MAX_BOARD_SIZE)
    }

    /// Iterate 1..=10
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN.0..=Self::MAX.0).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| format!("level {} is outside 1..=10", value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
