use crate::domain::{RegistryError, User};
use crate::interface_adapters::protocol::{CreateUserRequest, DeleteUserResponse, ErrorResponse};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};
use tracing::{debug, info, warn};

// Handler for listing all users in insertion order.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.registry.lock().await.list();
    debug!(count = users.len(), "listed users");
    Json(users)
}

// Handler for creating a user. The body is read raw so a missing content type
// or an empty body still creates a record.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), (StatusCode, Json<ErrorResponse>)> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let request =
        CreateUserRequest::from_request(content_type, &body).map_err(map_registry_error)?;

    let user = {
        let mut registry = state.registry.lock().await;
        registry.create(request.into())
    };

    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

// Handler for deleting users by id. Always reports success.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Json<DeleteUserResponse> {
    let removed = match parse_user_id(&raw_id) {
        Some(id) => {
            let removed = state.registry.lock().await.delete(id);
            info!(user_id = id, removed, "user delete requested");
            removed
        }
        None => {
            debug!(raw_id = %raw_id, "non-numeric user id; nothing to delete");
            0
        }
    };

    if removed > 1 {
        warn!(raw_id = %raw_id, removed, "delete matched duplicate ids");
    }

    Json(DeleteUserResponse::deleted())
}

// Reads the leading integer of the path segment: leading whitespace and a `+`
// are skipped and parsing stops at the first non-digit, so "2abc" and "2.5"
// both mean 2. No leading digits, or a negative value, matches no user.
fn parse_user_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    unsigned[..digits].parse::<u64>().ok()
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

fn map_registry_error(err: RegistryError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        RegistryError::MalformedBody(reason) => {
            warn!(%reason, "rejected create payload");
            error_response(StatusCode::BAD_REQUEST, "invalid JSON body")
        }
    }
}
