//! Session configuration, loadable from JSON

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::level::Level;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who controls the `O` mark
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Human `X` against the automated opponent
    #[default]
    VsAi,
    /// Two humans sharing one board
    TwoPlayer,
}

/// Settings for one campaign
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub mode: GameMode,
    /// Level the campaign starts (and restarts) at
    pub start_level: Level,
    /// Fixed board edge; `None` grows the board with the level
    pub board_size: Option<usize>,
    /// Pause before the opponent replies, for front-ends
    pub opponent_delay_ms: u64,
    /// Pause before the next round starts, for front-ends
    pub round_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::VsAi,
            start_level: Level::MIN,
            board_size: None,
            opponent_delay_ms: 400,
            round_delay_ms: 1200,
        }
    }
}

impl SessionConfig {
    pub fn two_player() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            ..Default::default()
        }
    }

    /// Play every level on the same board size, clamped to the supported range
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = Some(size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE));
        self
    }

    pub fn with_start_level(mut self, level: Level) -> Self {
        self.start_level = level;
        self
    }

    /// Board edge used at `level`. A fixed size outside 3..=10 is clamped.
    pub fn board_size_for(&self, level: Level) -> usize {
        self.board_size
            .map_or_else(|| level.board_size(), |size| size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE))
    }

    /// Reject values the arbiter cannot play
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(size) = self.board_size {
            if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
                anyhow::bail!(
                    "board_size {} is outside {}..={}",
                    size,
                    MIN_BOARD_SIZE,
                    MAX_BOARD_SIZE
                );
            }
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: SessionConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.mode, GameMode::VsAi);
        assert_eq!(config.start_level, Level::MIN);
        assert_eq!(config.board_size, None);
        assert_eq!(config.opponent_delay_ms, 400);
        assert_eq!(config.round_delay_ms, 1200);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "mode": "two_player", "board_size": 3 }"#).unwrap();
        assert_eq!(config.mode, GameMode::TwoPlayer);
        assert_eq!(config.board_size, Some(3));
        assert_eq!(config.round_delay_ms, 1200);
        assert_eq!(config.board_size_for(Level::MAX), 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(SessionConfig::from_json(r#"{ "board_size": 11 }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "start_level": 0 }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn test_board_size_clamped() {
        assert_eq!(SessionConfig::default().with_board_size(0).board_size, Some(3));
        assert_eq!(SessionConfig::default().with_board_size(12).board_size, Some(10));

        let literal = SessionConfig {
            board_size: Some(1),
            ..SessionConfig::default()
        };
        assert!(literal.validate().is_err());
        assert_eq!(literal.board_size_for(Level::MAX), 3);
    }

    #[test]
    fn test_growing_board() {
        let config = SessionConfig::default();
        assert_eq!(config.board_size_for(Level::MIN), 3);
        assert_eq!(config.board_size_for(Level::new(4).unwrap()), 6);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionConfig::load(Path::new("/nonexistent/noughts.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
