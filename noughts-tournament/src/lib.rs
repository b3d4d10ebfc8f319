//! noughts tournament - opponent strength through automated play
//!
//! This crate provides match infrastructure:
//! - Single rounds between the level-scaled opponent and a baseline player
//! - Matches of many seeded rounds, sequential or parallel
//! - A ladder report covering every level
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_ladder (orchestration)
//! - Level 2: play_match (phases)
//! - Level 3: GameRunner::play_round (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod ladder;
mod match_play;

pub use config::{Baseline, LadderConfig, MatchConfig};
pub use game_runner::{GameRunner, RoundRecord};
pub use ladder::{run_ladder, run_ladder_with, LadderReport, LevelStanding};
pub use match_play::{play_match, MatchResult};
