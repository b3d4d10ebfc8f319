//! Configuration types for automated play
//!
//! Level 4 - Utilities and configuration

use noughts_core::{Level, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The non-adaptive player the opponent is measured against. Always plays `X`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Uniformly random empty cells
    #[default]
    Random,
    /// Minimax on 3×3, random on larger boards
    Perfect,
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Baseline::Random => write!(f, "random"),
            Baseline::Perfect => write!(f, "perfect"),
        }
    }
}

impl FromStr for Baseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Baseline::Random),
            "perfect" => Ok(Baseline::Perfect),
            other => Err(format!("unknown baseline: {}", other)),
        }
    }
}

/// Configuration for one match at a single level
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Opponent level
    pub level: Level,
    /// Fixed board edge; `None` uses the level's board size
    pub board_size: Option<usize>,
    /// Number of rounds to play
    pub games: usize,
    /// Player the opponent faces
    pub baseline: Baseline,
    /// Base seed; game `i` uses `seed + i` (None = 42)
    pub seed: Option<u64>,
    /// Whether to run rounds in parallel
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            level: Level::MIN,
            board_size: None,
            games: 100,
            baseline: Baseline::Random,
            seed: None,
            parallel: true,
        }
    }
}

impl MatchConfig {
    pub fn new(level: Level, games: usize) -> Self {
        Self {
            level,
            games,
            ..Default::default()
        }
    }

    /// Fix the board edge, clamped into the supported range
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = Some(size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE));
        self
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Board edge the rounds are played on
    pub fn effective_board_size(&self) -> usize {
        self.board_size.unwrap_or_else(|| self.level.board_size())
    }
}

/// Configuration for a full ladder run (one match per level)
#[derive(Clone, Debug)]
pub struct LadderConfig {
    /// Rounds per level
    pub games_per_level: usize,
    pub baseline: Baseline,
    pub board_size: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            games_per_level: 100,
            baseline: Baseline::Random,
            board_size: None,
            seed: None,
            parallel: true,
        }
    }
}

impl LadderConfig {
    pub fn new(games_per_level: usize) -> Self {
        Self {
            games_per_level,
            ..Default::default()
        }
    }

    /// Match configuration for one rung
    pub fn match_config(&self, level: Level) -> MatchConfig {
        MatchConfig {
            level,
            board_size: self
                .board_size
                .map(|s| s.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE)),
            games: self.games_per_level,
            baseline: self.baseline,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_config_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.level, Level::MIN);
        assert_eq!(config.games, 100);
        assert_eq!(config.baseline, Baseline::Random);
        assert!(config.parallel);
        assert_eq!(config.effective_board_size(), 3);
    }

    #[test]
    fn test_board_size_clamped() {
        let config = MatchConfig::default().with_board_size(42);
        assert_eq!(config.board_size, Some(MAX_BOARD_SIZE));
    }

    #[test]
    fn test_effective_board_size_follows_level() {
        let config = MatchConfig::new(Level::new(3).unwrap(), 10);
        assert_eq!(config.effective_board_size(), 5);
        assert_eq!(config.with_board_size(3).effective_board_size(), 3);
    }

    #[test]
    fn test_baseline_parse() {
        assert_eq!("Perfect".parse::<Baseline>(), Ok(Baseline::Perfect));
        assert_eq!("random".parse::<Baseline>(), Ok(Baseline::Random));
        assert!("greedy".parse::<Baseline>().is_err());
    }

    #[test]
    fn test_ladder_match_config() {
        let ladder = LadderConfig {
            board_size: Some(3),
            ..LadderConfig::new(8)
        };
        let config = ladder.match_config(Level::MAX);
        assert_eq!(config.games, 8);
        assert_eq!(config.level, Level::MAX);
        assert_eq!(config.effective_board_size(), 3);
    }
}
