//! Axum webserver exposing the tracker's read endpoints
//!
//! Route handlers live in `routes/`, one file per topic. Shared handles
//! (database, price cache, estimator, game client) travel in `AppState`.

pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use server::{shutdown, start_server};
pub use state::AppState;
