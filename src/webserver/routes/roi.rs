use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use crate::webserver::{state::AppState, utils::success_response};

pub fn routes() -> Router<AppState> {
    Router::new().route("/roi/stats", get(roi_stats))
}

/// GET /roi/stats
///
/// The full projection for the configured estimator strategy. The
/// strategy name is included so clients can tell which model produced
/// the numbers.
async fn roi_stats(State(state): State<AppState>) -> Response {
    let report = state.roi.report().await;

    let mut body = serde_json::to_value(&report).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = body {
        map.insert(
            "strategy".to_string(),
            Value::String(state.roi.strategy().as_str().to_string()),
        );
    }

    success_response(body)
}
