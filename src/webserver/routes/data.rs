use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::webserver::{state::AppState, utils::error_response};

pub fn routes() -> Router<AppState> {
    Router::new().route("/data/:file", get(serve_data))
}

/// GET /data/:file
///
/// Serves fetcher snapshots from the data directory. Only bare
/// filenames are accepted; anything resembling a path is rejected.
async fn serve_data(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    if file.contains('/') || file.contains('\\') || file.contains("..") {
        return error_response(StatusCode::BAD_REQUEST, "Invalid filename", &file);
    }

    let path = std::path::Path::new(&state.config.fetcher.data_dir).join(&file);
    match tokio::fs::read(&path).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(_) => error_response(
            StatusCode::NOT_FOUND,
            "File not found",
            &format!("File not found: {}", file),
        ),
    }
}
