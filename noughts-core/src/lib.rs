//! noughts core - board arbiter and opponent AI
//!
//! This crate provides the game logic:
//! - N×N board with row, column and full-diagonal win detection
//! - Round state machine (in progress, win, draw)
//! - Level-scaled opponent ladder with exact 3×3 minimax
//! - Campaign session: level progression, score, restart
//! - Session configuration

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod level;
pub mod session;

// Re-exports for convenient access
pub use ai::{decide, ladder, select_opponent_move, Decision, OpponentAi, Rule};
pub use board::{apply_move, check_win, is_draw, Board, Cell, Mark, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use config::{GameMode, SessionConfig};
pub use error::{IllegalMove, ParseBoardError};
pub use eval::{minimax_move, WIN_SCORE};
pub use game::{Placement, Round, RoundStatus};
pub use level::Level;
pub use session::{MoveOutcome, Phase, Progress, Score, Session, SessionView};
