use crate::interface_adapters::handlers::{create_user, delete_user, list_users};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::cors::CorsLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", delete(delete_user))
        // Any origin may call the API.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
