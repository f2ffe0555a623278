use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde_json::json;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::prices::AssetKind;
use crate::webserver::{
    state::AppState,
    utils::{error_response, success_response},
};

/// Rows returned by the price history endpoint
const HISTORY_LIMIT: u32 = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gold/price", get(gold_price))
        .route("/gold/price/history", get(gold_price_history))
        .route("/nft/price", get(nft_price))
}

/// GET /gold/price
///
/// Cached-or-refreshed gold price. The gold asset always resolves
/// through its fallback chain, so this endpoint never errors.
async fn gold_price(State(state): State<AppState>) -> Response {
    let cached = state.prices.is_fresh(AssetKind::GoldToken);
    let price = state.prices.gold_price(false).await;
    let change_24h = gold_change_24h(&state, price).await;

    let timestamp = state
        .prices
        .fetched_at(AssetKind::GoldToken)
        .unwrap_or_else(Utc::now);

    success_response(json!({
        "price": price,
        "timestamp": timestamp,
        "cached": cached,
        "change_24h": change_24h,
    }))
}

/// Percentage change against the most recent stored price older than
/// 24 hours; 0 when there is no usable reference point.
async fn gold_change_24h(state: &AppState, current: f64) -> f64 {
    match state.db.gold_price_24h_ago(Utc::now()).await {
        Ok(Some(old)) if old > 0.0 => ((current - old) / old) * 100.0,
        Ok(_) => 0.0,
        Err(e) => {
            logger::warning(
                LogTag::Webserver,
                &format!("24h change lookup failed: {}", e),
            );
            0.0
        }
    }
}

/// GET /gold/price/history
///
/// Recent gold price audit rows, newest first
async fn gold_price_history(State(state): State<AppState>) -> Response {
    match state.db.gold_price_history(HISTORY_LIMIT).await {
        Ok(points) => success_response(points),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to read price history",
            &e.to_string(),
        ),
    }
}

/// GET /nft/price
///
/// Composite NFT floor price in USD. The one endpoint that can report
/// unavailability instead of degrading to a synthetic number.
async fn nft_price(State(state): State<AppState>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "NFT price endpoint called");
    }

    match state.prices.nft_price_usd().await {
        Ok(composite) => success_response(composite),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to calculate NFT price in USD",
            &e.to_string(),
        ),
    }
}
