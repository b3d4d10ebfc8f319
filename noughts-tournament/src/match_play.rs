//! Match play - many rounds at one level
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;

use crate::config::MatchConfig;
use crate::game_runner::{GameRunner, RoundRecord};

/// Result of a match (multiple rounds)
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// Rounds won by the level-scaled opponent
    pub opponent_wins: u32,
    /// Rounds won by the baseline
    pub baseline_wins: u32,
    pub draws: u32,
    /// Average round length in plies
    pub avg_plies: f32,
    pub games_played: u32,
    /// Individual round records
    pub records: Vec<RoundRecord>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            opponent_wins: 0,
            baseline_wins: 0,
            draws: 0,
            avg_plies: 0.0,
            games_played: 0,
            records: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_plies = if total_games > 0 {
            (self.avg_plies * self.games_played as f32
                + other.avg_plies * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let mut records = self.records.clone();
        records.extend(other.records.iter().cloned());

        MatchResult {
            opponent_wins: self.opponent_wins + other.opponent_wins,
            baseline_wins: self.baseline_wins + other.baseline_wins,
            draws: self.draws + other.draws,
            avg_plies,
            games_played: total_games,
            records,
        }
    }

    fn rate(&self, count: u32) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            count as f32 / self.games_played as f32
        }
    }

    pub fn opponent_win_rate(&self) -> f32 {
        self.rate(self.opponent_wins)
    }

    pub fn baseline_win_rate(&self) -> f32 {
        self.rate(self.baseline_wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }
}

/// Play a match at one level (Level 2 phase)
///
/// Round `i` is seeded with `seed + i`, so sequential and parallel runs of
/// the same configuration produce the same records.
pub fn play_match(config: &MatchConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty();
    }

    let runner = GameRunner::new(config);
    let base_seed = config.seed.unwrap_or(42);
    let seeds: Vec<u64> = (0..config.games)
        .map(|i| base_seed.wrapping_add(i as u64))
        .collect();

    let records: Vec<RoundRecord> = if config.parallel {
        seeds.par_iter().map(|&s| runner.play_round(s)).collect()
    } else {
        seeds.iter().map(|&s| runner.play_round(s)).collect()
    };

    aggregate_results(records)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Aggregate round records into match result
fn aggregate_results(records: Vec<RoundRecord>) -> MatchResult {
    let games_played = records.len() as u32;
    let opponent_wins = records.iter().filter(|r| r.opponent_wins()).count() as u32;
    let baseline_wins = records.iter().filter(|r| r.baseline_wins()).count() as u32;
    let draws = records.iter().filter(|r| r.is_draw()).count() as u32;
    let total_plies: usize = records.iter().map(RoundRecord::plies).sum();
    let avg_plies = if games_played > 0 {
        total_plies as f32 / games_played as f32
    } else {
        0.0
    };

    MatchResult {
        opponent_wins,
        baseline_wins,
        draws,
        avg_plies,
        games_played,
        records,
    }
}
