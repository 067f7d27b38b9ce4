// Plain HTTP routes alongside the WebSocket.

use crate::interface_adapters::protocol::FrameDto;
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

/// Canvas setup for clients that want it before opening the socket.
pub async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    Json(FrameDto::new(state.frame, state.flip_horizontal))
}

pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not found".to_string(),
        }),
    )
}
