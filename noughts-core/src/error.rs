//! Error types for the arbiter

use crate::board::Mark;
use serde::Serialize;
use thiserror::Error;

/// A move the arbiter refused. The board it was aimed at is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IllegalMove {
    #[error("cell {index} is outside the {size}x{size} board")]
    OutOfRange { index: usize, size: usize },

    #[error("cell {index} is already marked {mark}")]
    Occupied { index: usize, mark: Mark },

    #[error("the round is already over")]
    RoundOver,

    #[error("it is {expected}'s turn")]
    WrongTurn { expected: Mark },
}

impl IllegalMove {
    /// Short machine-readable name of the rejection reason
    pub fn reason(&self) -> &'static str {
        match self {
            IllegalMove::OutOfRange { .. } => "out_of_range",
            IllegalMove::Occupied { .. } => "occupied",
            IllegalMove::RoundOver => "round_over",
            IllegalMove::WrongTurn { .. } => "wrong_turn",
        }
    }
}

/// Failure to parse the text board notation (`X`, `O`, `.` per cell)
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?} in board")]
    InvalidCell(char),

    #[error("{0} cells do not form a square board")]
    NotSquare(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = IllegalMove::OutOfRange { index: 9, size: 3 };
        assert_eq!(err.to_string(), "cell 9 is outside the 3x3 board");

        let err = IllegalMove::Occupied { index: 4, mark: Mark::Opponent };
        assert_eq!(err.to_string(), "cell 4 is already marked O");
        assert_eq!(err.reason(), "occupied");
    }

    #[test]
    fn test_serializes_with_reason_tag() {
        let json = serde_json::to_value(IllegalMove::WrongTurn { expected: Mark::Player }).unwrap();
        assert_eq!(json["reason"], "wrong_turn");
        assert_eq!(json["expected"], "X");
    }
}
