use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::webserver::{
    state::AppState,
    utils::{error_response, success_response},
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/inventory", get(list_inventory))
}

/// GET /inventory
///
/// All inventory items, most valuable first
async fn list_inventory(State(state): State<AppState>) -> Response {
    match state.db.list_inventory().await {
        Ok(items) => success_response(items),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to read inventory",
            &e.to_string(),
        ),
    }
}
