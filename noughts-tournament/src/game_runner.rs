//! Game runner - executes single rounds
//!
//! Level 3 - Step-level implementation

use noughts_core::{minimax_move, select_opponent_move, Board, Level, Mark, Placement, Round, RoundStatus};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{Baseline, MatchConfig};

/// Outcome of a single round
#[derive(Clone, Debug)]
pub struct RoundRecord {
    /// Terminal status
    pub status: RoundStatus,
    /// Every placement in order
    pub moves: Vec<Placement>,
}

impl RoundRecord {
    pub fn opponent_wins(&self) -> bool {
        self.status == RoundStatus::OpponentWin
    }

    pub fn baseline_wins(&self) -> bool {
        self.status == RoundStatus::PlayerWin
    }

    pub fn is_draw(&self) -> bool {
        self.status == RoundStatus::Draw
    }

    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Plays rounds of the opponent ladder against a baseline
pub struct GameRunner {
    level: Level,
    board_size: usize,
    baseline: Baseline,
    seed_counter: u64,
}

impl GameRunner {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            level: config.level,
            board_size: config.effective_board_size(),
            baseline: config.baseline,
            seed_counter: config.seed.unwrap_or(42),
        }
    }

    /// Play a round with the next seed
    pub fn play_next(&mut self) -> RoundRecord {
        let seed = self.next_seed();
        self.play_round(seed)
    }

    /// Play one round from an empty board; the baseline moves first as `X`
    pub fn play_round(&self, seed: u64) -> RoundRecord {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut round = Round::new(self.board_size);

        while !round.status().is_terminal() {
            let index = match round.to_move() {
                Mark::Player => baseline_move(round.board(), self.baseline, &mut rng),
                Mark::Opponent => select_opponent_move(round.board(), self.level, &mut rng),
            };
            // A non-terminal round always has an empty cell
            let Some(index) = index else { break };
            match round.apply_move(index) {
                Ok(next) => round = next,
                Err(err) => {
                    tracing::warn!("Rejected move {} in simulated round: {}", index, err);
                    break;
                }
            }
        }

        RoundRecord {
            status: round.status(),
            moves: round.history().to_vec(),
        }
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}

/// Baseline choice for `X`
fn baseline_move<R: Rng + ?Sized>(board: &Board, baseline: Baseline, rng: &mut R) -> Option<usize> {
    match baseline {
        Baseline::Perfect => {
            minimax_move(board, Mark::Player).or_else(|| random_move(board, rng))
        }
        Baseline::Random => random_move(board, rng),
    }
}

fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_cells().choose(rng).copied()
}
