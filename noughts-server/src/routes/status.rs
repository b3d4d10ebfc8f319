//! Liveness probe with a snapshot of server load

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use noughts_core::{Level, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use serde::Serialize;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Campaigns currently held in memory
    pub sessions: usize,
    pub max_level: Level,
    pub board_sizes: [usize; 2],
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.session_count(),
        max_level: Level::MAX,
        board_sizes: [MIN_BOARD_SIZE, MAX_BOARD_SIZE],
    })
}
