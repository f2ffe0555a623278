use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::database::EarningsRecord;
use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, utils::success_response};

pub fn routes() -> Router<AppState> {
    Router::new().route("/gold/earnings", get(list_earnings))
}

/// GET /gold/earnings
///
/// All earnings rows, most recent date first. A storage failure
/// degrades to an empty list rather than an error.
async fn list_earnings(State(state): State<AppState>) -> Response {
    let earnings: Vec<EarningsRecord> = match state.db.list_earnings().await {
        Ok(rows) => rows,
        Err(e) => {
            logger::warning(LogTag::Webserver, &format!("Earnings read failed: {}", e));
            Vec::new()
        }
    };

    success_response(earnings)
}
