/// Shared application state passed to all route handlers
use crate::apis::game::GameApiClient;
use crate::config::Config;
use crate::database::Database;
use crate::prices::PriceCache;
use crate::roi::RoiEstimator;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<Database>,
    pub prices: Arc<PriceCache>,
    pub roi: Arc<RoiEstimator>,
    pub game: Arc<GameApiClient>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        db: Arc<Database>,
        prices: Arc<PriceCache>,
        roi: Arc<RoiEstimator>,
        game: Arc<GameApiClient>,
    ) -> Self {
        Self {
            config,
            db,
            prices,
            roi,
            game,
            startup_time: Utc::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
