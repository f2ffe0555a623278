use crate::webserver::state::AppState;
use axum::Router;

pub mod data;
pub mod earnings;
pub mod inventory;
pub mod market;
pub mod prices;
pub mod proxy;
pub mod roi;
pub mod status;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(prices::routes())
        .merge(earnings::routes())
        .merge(inventory::routes())
        .merge(roi::routes())
        .merge(market::routes())
        .merge(data::routes())
        .merge(proxy::routes())
        .with_state(state)
}
