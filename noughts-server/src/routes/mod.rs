//! HTTP route handlers

pub mod levels;
pub mod sessions;
pub mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use noughts_core::IllegalMove;
use serde_json::json;

/// Error body returned by every handler
#[derive(Debug)]
pub enum ApiError {
    UnknownSession(u64),
    IllegalMove(IllegalMove),
    BadRequest(String),
}

impl From<IllegalMove> for ApiError {
    fn from(err: IllegalMove) -> Self {
        ApiError::IllegalMove(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UnknownSession(id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("No session with id {}", id) }),
            ),
            ApiError::IllegalMove(err) => (
                StatusCode::CONFLICT,
                json!({ "error": err.to_string(), "reason": err.reason() }),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
        };
        (status, Json(body)).into_response()
    }
}
