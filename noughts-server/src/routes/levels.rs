//! Level table endpoint

use axum::Json;
use noughts_core::{ladder, Level, Rule};
use serde::Serialize;

#[derive(Serialize)]
pub struct LevelInfo {
    pub level: Level,
    pub board_size: usize,
    /// Opponent rules on the level's own board
    pub rules: Vec<Rule>,
    /// Opponent rules if the level were played on 3x3
    pub rules_3x3: Vec<Rule>,
}

/// Board size and opponent ladder for every level
pub async fn get_levels() -> Json<Vec<LevelInfo>> {
    Json(
        Level::all()
            .map(|level| LevelInfo {
                level,
                board_size: level.board_size(),
                rules: ladder(level, level.board_size()),
                rules_3x3: ladder(level, 3),
            })
            .collect(),
    )
}
