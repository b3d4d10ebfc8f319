//! Session API endpoints
//!
//! Create a campaign, submit human moves, request the opponent's reply and
//! move between levels.

use crate::routes::ApiError;
use crate::state::{ServerState, SessionEntry};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use noughts_core::{IllegalMove, MoveOutcome, Progress, Session, SessionConfig, SessionView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: u64,
    #[serde(flatten)]
    pub view: SessionView,
    pub opponent_delay_ms: u64,
    pub round_delay_ms: u64,
    /// True when the client should call the opponent endpoint next
    pub awaiting_opponent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<MoveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<&'static str>,
}

impl SessionResponse {
    fn new(id: u64, session: &Session) -> Self {
        Self {
            id,
            view: session.view(),
            opponent_delay_ms: session.config().opponent_delay_ms,
            round_delay_ms: session.config().round_delay_ms,
            awaiting_opponent: session.awaiting_opponent(),
            last_move: None,
            progress: None,
        }
    }
}

/// Either a flat cell index or a row/column pair
#[derive(Deserialize)]
pub struct MoveRequest {
    pub index: Option<usize>,
    pub row: Option<usize>,
    pub col: Option<usize>,
}

impl MoveRequest {
    fn resolve(&self, board_size: usize) -> Result<usize, ApiError> {
        match (self.index, self.row, self.col) {
            (Some(index), None, None) => Ok(index),
            (None, Some(row), Some(col)) => {
                if row >= board_size || col >= board_size {
                    Err(ApiError::IllegalMove(IllegalMove::OutOfRange {
                        index: row.saturating_mul(board_size).saturating_add(col),
                        size: board_size,
                    }))
                } else {
                    Ok(row * board_size + col)
                }
            }
            _ => Err(ApiError::BadRequest(
                "Must provide \"index\", or both \"row\" and \"col\"".to_string(),
            )),
        }
    }
}

/// Create a session; an empty body uses the default configuration
pub async fn create_session(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let config = if body.iter().all(u8::is_ascii_whitespace) {
        SessionConfig::default()
    } else {
        let text = std::str::from_utf8(&body)
            .map_err(|e| ApiError::BadRequest(format!("Body is not UTF-8: {}", e)))?;
        SessionConfig::from_json(text)
            .map_err(|e| ApiError::BadRequest(format!("Invalid session config: {:#}", e)))?
    };

    let (id, session) = state.create(config);
    tracing::info!("Created session {} ({:?})", id, session.config().mode);

    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, &session))))
}

pub async fn get_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionResponse>, ApiError> {
    state
        .with_session(id, |entry| SessionResponse::new(id, &entry.session))
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

pub async fn delete_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::UnknownSession(id))
    }
}

/// Human move
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    update(&state, id, |entry| {
        let index = req.resolve(entry.session.round().board().size())?;
        Ok(entry.session.play(index)?)
    })
}

/// Automated reply for `O`
pub async fn opponent_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionResponse>, ApiError> {
    update(&state, id, |entry| {
        let SessionEntry { session, rng } = entry;
        Ok(session.opponent_move(rng)?)
    })
}

/// Next level after a finished round
pub async fn advance(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionResponse>, ApiError> {
    state
        .with_session(id, |entry| {
            let progress = match entry.session.advance() {
                Progress::Advanced(level) => {
                    tracing::info!("Session {} advanced to level {}", id, level);
                    "advanced"
                }
                Progress::Complete => "complete",
                Progress::RoundInProgress => "round_in_progress",
            };
            let mut response = SessionResponse::new(id, &entry.session);
            response.progress = Some(progress);
            response
        })
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

/// Back to the starting level, score cleared
pub async fn restart(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionResponse>, ApiError> {
    state
        .with_session(id, |entry| {
            entry.session.restart();
            SessionResponse::new(id, &entry.session)
        })
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

fn update(
    state: &ServerState,
    id: u64,
    f: impl FnOnce(&mut SessionEntry) -> Result<MoveOutcome, ApiError>,
) -> Result<Json<SessionResponse>, ApiError> {
    state
        .with_session(id, |entry| -> Result<SessionResponse, ApiError> {
            let outcome = f(entry)?;
            let mut response = SessionResponse::new(id, &entry.session);
            response.last_move = Some(outcome);
            Ok(response)
        })
        .ok_or(ApiError::UnknownSession(id))?
        .map(Json)
}
