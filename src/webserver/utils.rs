/// JSON response helpers shared by route handlers
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// 200 with the value serialized as JSON
pub fn success_response<T: Serialize>(data: T) -> Response {
    Json(data).into_response()
}

/// Error envelope matching the frontend's expectations
pub fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message,
        })),
    )
        .into_response()
}
