//! Round state machine

use crate::board::{Board, Mark};
use crate::error::IllegalMove;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Status of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    InProgress,
    PlayerWin,
    OpponentWin,
    Draw,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::InProgress
    }

    /// Winning mark, if the round ended in a win
    pub fn winner(self) -> Option<Mark> {
        match self {
            RoundStatus::PlayerWin => Some(Mark::Player),
            RoundStatus::OpponentWin => Some(Mark::Opponent),
            RoundStatus::InProgress | RoundStatus::Draw => None,
        }
    }

    fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::Player => RoundStatus::PlayerWin,
            Mark::Opponent => RoundStatus::OpponentWin,
        }
    }
}

/// One accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub index: usize,
    pub mark: Mark,
}

// ============================================================================
// ROUND
// ============================================================================

/// A board from empty to a terminal state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    board: Board,
    to_move: Mark,
    status: RoundStatus,
    history: Vec<Placement>,
}

impl Round {
    /// Fresh empty board, player to move
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            to_move: Mark::Player,
            status: RoundStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Resume from an existing position, `to_move` next
    pub fn from_board(board: Board, to_move: Mark) -> Self {
        let status = classify(&board, to_move.other());
        Self {
            board,
            to_move,
            status,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that places next. Meaningless once the round is terminal.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Place the side-to-move's mark at `index`, returning the next round state
    pub fn apply_move(&self, index: usize) -> Result<Round, IllegalMove> {
        if self.status.is_terminal() {
            return Err(IllegalMove::RoundOver);
        }

        let mover = self.to_move;
        let board = self.board.apply_move(index, mover)?;
        let status = classify(&board, mover);

        let mut history = self.history.clone();
        history.push(Placement { index, mark: mover });

        Ok(Round {
            board,
            to_move: if status.is_terminal() { mover } else { mover.other() },
            status,
            history,
        })
    }
}

/// Win for the mover, else draw, else still in progress
fn classify(board: &Board, mover: Mark) -> RoundStatus {
    if board.check_win(mover) {
        RoundStatus::won_by(mover)
    } else if board.check_win(mover.other()) {
        RoundStatus::won_by(mover.other())
    } else if board.is_full() {
        RoundStatus::Draw
    } else {
        RoundStatus::InProgress
    }
}

// ============================================================================
// TESTS
// ============================================================================
