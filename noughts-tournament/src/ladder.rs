//! Ladder - one match per level, reported side by side
//!
//! Level 1 - Orchestration

use noughts_core::{ladder, Level, Rule};
use serde::Serialize;

use crate::config::{Baseline, LadderConfig};
use crate::match_play::play_match;

/// How the opponent fared at one level
#[derive(Clone, Debug, Serialize)]
pub struct LevelStanding {
    pub level: Level,
    pub board_size: usize,
    /// Rules the opponent consults at this level, in order
    pub rules: Vec<Rule>,
    pub games: u32,
    pub opponent_wins: u32,
    pub baseline_wins: u32,
    pub draws: u32,
    pub opponent_win_rate: f32,
    pub avg_plies: f32,
}

/// Standings for every level
#[derive(Clone, Debug, Serialize)]
pub struct LadderReport {
    pub baseline: Baseline,
    pub games_per_level: usize,
    pub standings: Vec<LevelStanding>,
}

impl LadderReport {
    pub fn standing(&self, level: Level) -> Option<&LevelStanding> {
        self.standings.iter().find(|s| s.level == level)
    }
}

/// Run a match for every level 1..=10
pub fn run_ladder(config: &LadderConfig) -> LadderReport {
    run_ladder_with(config, |_| {})
}

/// Like [`run_ladder`], calling `on_level` after each finished level
pub fn run_ladder_with<F>(config: &LadderConfig, mut on_level: F) -> LadderReport
where
    F: FnMut(&LevelStanding),
{
    let mut standings = Vec::with_capacity(Level::MAX.get() as usize);

    for level in Level::all() {
        let match_config = config.match_config(level);
        let board_size = match_config.effective_board_size();
        let result = play_match(&match_config);

        let standing = LevelStanding {
            level,
            board_size,
            rules: ladder(level, board_size),
            games: result.games_played,
            opponent_wins: result.opponent_wins,
            baseline_wins: result.baseline_wins,
            draws: result.draws,
            opponent_win_rate: result.opponent_win_rate(),
            avg_plies: result.avg_plies,
        };

        tracing::debug!(
            "Level {} ({}x{}): {}W {}L {}D",
            level,
            board_size,
            board_size,
            standing.opponent_wins,
            standing.baseline_wins,
            standing.draws
        );

        on_level(&standing);
        standings.push(standing);
    }

    LadderReport {
        baseline: config.baseline,
        games_per_level: config.games_per_level,
        standings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_3x3(games: usize) -> LadderConfig {
        LadderConfig {
            board_size: Some(3),
            seed: Some(2024),
            ..LadderConfig::new(games)
        }
    }

    #[test]
    fn test_every_level_reported() {
        let mut seen = Vec::new();
        let report = run_ladder_with(&LadderConfig::new(2), |s| seen.push(s.level));
        assert_eq!(report.standings.len(), 10);
        assert_eq!(seen, Level::all().collect::<Vec<_>>());
        assert_eq!(report.standings[0].board_size, 3);
        assert_eq!(report.standings[9].board_size, 10);
    }

    #[test]
    fn test_minimax_levels_unbeaten_on_3x3() {
        let report = run_ladder(&fixed_3x3(40));
        for lvl in 8..=10 {
            let standing = report.standing(Level::new(lvl).unwrap()).unwrap();
            assert_eq!(standing.baseline_wins, 0);
            assert_eq!(standing.rules, vec![Rule::Minimax]);
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = run_ladder(&LadderConfig::new(1));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["baseline"], "random");
        assert_eq!(json["standings"][0]["level"], 1);
        assert_eq!(json["standings"][0]["rules"][0], "random");
    }
}
