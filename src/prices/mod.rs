//! Time-bounded price caches with a strict fallback chain
//!
//! One cache slot per tracked asset, each with its own TTL. A read
//! returns the cached value while fresh, otherwise tries the live
//! source and degrades in order: last cached value, last database
//! value, hardcoded default. Reads never fail; the only surfaced
//! absence is the composite NFT floor USD computation, where
//! multiplying by a synthetic zero would be worse than reporting
//! unavailability.

pub mod clock;
pub mod source;

pub use clock::{Clock, SystemClock};
pub use source::{LivePriceSource, PriceSource};

use crate::database::Database;
use crate::errors::{TrackerError, TrackerResult};
use crate::logger::{self, LogTag};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Fallback gold price when no live, cached, or stored value exists
pub const GOLD_DEFAULT_PRICE: f64 = 0.1;

/// Tracked assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Gold token price in USD
    GoldToken,
    /// NFT collection floor price in SOL
    NftFloor,
    /// SOL price in USD
    SolUsd,
}

impl AssetKind {
    /// Maximum age before a cached value is considered stale.
    /// SOL/USD moves faster than the in-game assets.
    pub fn ttl(&self) -> Duration {
        match self {
            AssetKind::GoldToken | AssetKind::NftFloor => Duration::minutes(5),
            AssetKind::SolUsd => Duration::minutes(1),
        }
    }

    /// Hardcoded last-resort price. Only the gold token has one; for
    /// the other assets a fully exhausted fallback chain yields None.
    pub fn default_price(&self) -> Option<f64> {
        match self {
            AssetKind::GoldToken => Some(GOLD_DEFAULT_PRICE),
            AssetKind::NftFloor | AssetKind::SolUsd => None,
        }
    }

    /// Whether successful fetches are mirrored to the durable gold
    /// price history table
    pub fn records_history(&self) -> bool {
        matches!(self, AssetKind::GoldToken)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::GoldToken => "gold",
            AssetKind::NftFloor => "nft_floor",
            AssetKind::SolUsd => "sol_usd",
        }
    }
}

/// One cache slot. `value` and `fetched_at` are set together, only by
/// a successful fetch; expiry is checked lazily at read time.
#[derive(Debug, Clone, Copy, Default)]
struct PriceSlot {
    value: Option<f64>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Composite NFT floor price in USD with both legs
#[derive(Debug, Clone, Serialize)]
pub struct NftPriceUsd {
    pub price: f64,
    pub price_sol: f64,
    pub sol_usd: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

pub struct PriceCache {
    source: Arc<dyn PriceSource>,
    db: Arc<Database>,
    clock: Arc<dyn Clock>,
    gold: RwLock<PriceSlot>,
    nft_floor: RwLock<PriceSlot>,
    sol_usd: RwLock<PriceSlot>,
}

impl PriceCache {
    pub fn new(source: Arc<dyn PriceSource>, db: Arc<Database>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            db,
            clock,
            gold: RwLock::new(PriceSlot::default()),
            nft_floor: RwLock::new(PriceSlot::default()),
            sol_usd: RwLock::new(PriceSlot::default()),
        }
    }

    fn slot(&self, kind: AssetKind) -> &RwLock<PriceSlot> {
        match kind {
            AssetKind::GoldToken => &self.gold,
            AssetKind::NftFloor => &self.nft_floor,
            AssetKind::SolUsd => &self.sol_usd,
        }
    }

    /// Cached value if it is still within the asset's TTL
    fn fresh_value(&self, kind: AssetKind) -> Option<f64> {
        let slot = *self.slot(kind).read().unwrap();
        match (slot.value, slot.fetched_at) {
            (Some(value), Some(fetched_at)) if self.clock.now() - fetched_at < kind.ttl() => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Cached value regardless of age (fallback step a)
    fn stale_value(&self, kind: AssetKind) -> Option<f64> {
        self.slot(kind).read().unwrap().value
    }

    fn store(&self, kind: AssetKind, value: f64) {
        let mut slot = self.slot(kind).write().unwrap();
        slot.value = Some(value);
        slot.fetched_at = Some(self.clock.now());
    }

    /// Timestamp of the last successful fetch for an asset
    pub fn fetched_at(&self, kind: AssetKind) -> Option<DateTime<Utc>> {
        self.slot(kind).read().unwrap().fetched_at
    }

    /// True when the asset currently has a fresh cached value
    pub fn is_fresh(&self, kind: AssetKind) -> bool {
        self.fresh_value(kind).is_some()
    }

    /// Current price for an asset
    ///
    /// Never fails; `None` is only possible for assets without a
    /// hardcoded default when every fallback step comes up empty.
    pub async fn get(&self, kind: AssetKind, force_refresh: bool) -> Option<f64> {
        if !force_refresh {
            if let Some(value) = self.fresh_value(kind) {
                logger::debug(
                    LogTag::Prices,
                    &format!("{} cache hit: {}", kind.as_str(), value),
                );
                return Some(value);
            }
        }

        match self.source.fetch(kind).await {
            Ok(value) if value > 0.0 && value.is_finite() => {
                self.store(kind, value);
                logger::debug(
                    LogTag::Prices,
                    &format!("{} fetched live: {}", kind.as_str(), value),
                );

                if kind.records_history() {
                    // Fire-and-forget: history is an audit trail, a failed
                    // write must not fail the price read.
                    if let Err(e) = self.db.append_gold_price(self.clock.now(), value).await {
                        logger::warning(
                            LogTag::Prices,
                            &format!("Failed to record gold price history: {}", e),
                        );
                    }
                }

                Some(value)
            }
            Ok(value) => {
                logger::warning(
                    LogTag::Prices,
                    &format!("{} live fetch returned unusable value {}", kind.as_str(), value),
                );
                self.fallback(kind).await
            }
            Err(e) => {
                logger::warning(
                    LogTag::Prices,
                    &format!("{} live fetch failed: {}", kind.as_str(), e),
                );
                self.fallback(kind).await
            }
        }
    }

    /// Strict fallback order: cached (any age), then durable history,
    /// then hardcoded default. Each step taken is logged so operators
    /// can tell fresh from stale from synthetic answers.
    async fn fallback(&self, kind: AssetKind) -> Option<f64> {
        if let Some(value) = self.stale_value(kind) {
            logger::warning(
                LogTag::Prices,
                &format!("{} serving stale cached value {}", kind.as_str(), value),
            );
            return Some(value);
        }

        if kind.records_history() {
            match self.db.latest_gold_price().await {
                Ok(Some(value)) => {
                    logger::warning(
                        LogTag::Prices,
                        &format!("{} serving last stored value {}", kind.as_str(), value),
                    );
                    return Some(value);
                }
                Ok(None) => {}
                Err(e) => {
                    logger::warning(
                        LogTag::Prices,
                        &format!("{} history read failed: {}", kind.as_str(), e),
                    );
                }
            }
        }

        if let Some(value) = kind.default_price() {
            logger::warning(
                LogTag::Prices,
                &format!("{} serving hardcoded default {}", kind.as_str(), value),
            );
            return Some(value);
        }

        logger::error(
            LogTag::Prices,
            &format!("{} has no cached, stored, or default price", kind.as_str()),
        );
        None
    }

    /// Gold token price in USD. The gold asset has a hardcoded default,
    /// so this always resolves.
    pub async fn gold_price(&self, force_refresh: bool) -> f64 {
        self.get(AssetKind::GoldToken, force_refresh)
            .await
            .unwrap_or(GOLD_DEFAULT_PRICE)
    }

    /// NFT floor price in USD: floor (SOL) times SOL/USD, each leg
    /// through the cache contract. Fails iff either leg has no value at
    /// all; defaulting a missing leg to zero would silently zero the
    /// product.
    pub async fn nft_price_usd(&self) -> TrackerResult<NftPriceUsd> {
        let floor_sol = self.get(AssetKind::NftFloor, false).await;
        let sol_usd = self.get(AssetKind::SolUsd, false).await;

        match (floor_sol, sol_usd) {
            (Some(price_sol), Some(sol_usd)) => Ok(NftPriceUsd {
                price: price_sol * sol_usd,
                price_sol,
                sol_usd,
                timestamp: self.fetched_at(AssetKind::NftFloor),
            }),
            (floor_sol, sol_usd) => {
                let missing = match (floor_sol, sol_usd) {
                    (None, None) => "NFT floor and SOL/USD",
                    (None, _) => "NFT floor",
                    _ => "SOL/USD",
                };
                Err(TrackerError::PriceUnavailable(format!(
                    "No price available for {}",
                    missing
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::ApiError;
    use crate::prices::clock::testing::ManualClock;
    use crate::prices::source::testing::FakeSource;

    fn setup() -> (Arc<FakeSource>, Arc<Database>, Arc<ManualClock>, PriceCache) {
        let source = Arc::new(FakeSource::new());
        let db = Arc::new(Database::open_in_memory().unwrap());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = PriceCache::new(source.clone(), db.clone(), clock.clone());
        (source, db, clock, cache)
    }

    #[tokio::test]
    async fn test_second_read_within_ttl_hits_cache() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.05));

        let first = cache.get(AssetKind::GoldToken, false).await;
        let second = cache.get(AssetKind::GoldToken, false).await;

        assert_eq!(first, Some(0.05));
        assert_eq!(second, Some(0.05));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_one_refetch() {
        let (source, _db, clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.05));

        cache.get(AssetKind::GoldToken, false).await;
        clock.advance(Duration::minutes(6));
        source.set(AssetKind::GoldToken, Ok(0.07));

        let refreshed = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(refreshed, Some(0.07));
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_sol_ttl_is_shorter_than_gold() {
        let (source, _db, clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.05));
        source.set(AssetKind::SolUsd, Ok(150.0));

        cache.get(AssetKind::GoldToken, false).await;
        cache.get(AssetKind::SolUsd, false).await;
        clock.advance(Duration::minutes(2));

        // Gold still fresh at 2 minutes, SOL expired
        cache.get(AssetKind::GoldToken, false).await;
        cache.get(AssetKind::SolUsd, false).await;
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_stale_cache() {
        let (source, _db, clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.05));

        cache.get(AssetKind::GoldToken, false).await;
        clock.advance(Duration::minutes(6));
        source.set(
            AssetKind::GoldToken,
            Err(ApiError::NetworkError("connection refused".to_string())),
        );

        let value = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(value, Some(0.05));
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_database() {
        let (source, db, clock, cache) = setup();
        db.append_gold_price(clock.now(), 0.08).await.unwrap();
        source.set(AssetKind::GoldToken, Err(ApiError::Timeout));

        let value = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(value, Some(0.08));
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_default() {
        let (source, _db, _clock, cache) = setup();
        source.set(
            AssetKind::GoldToken,
            Err(ApiError::NetworkError("dns".to_string())),
        );

        let value = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(value, Some(GOLD_DEFAULT_PRICE));
    }

    #[tokio::test]
    async fn test_missing_credential_uses_same_fallback_chain() {
        let (source, db, clock, cache) = setup();
        db.append_gold_price(clock.now(), 0.09).await.unwrap();
        source.set(AssetKind::GoldToken, Err(ApiError::Disabled));

        let value = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(value, Some(0.09));
    }

    #[tokio::test]
    async fn test_non_positive_value_is_a_fetch_failure() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.0));

        let value = cache.get(AssetKind::GoldToken, false).await;
        assert_eq!(value, Some(GOLD_DEFAULT_PRICE));
    }

    #[tokio::test]
    async fn test_sol_exhausted_chain_yields_none() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::SolUsd, Err(ApiError::Timeout));

        assert_eq!(cache.get(AssetKind::SolUsd, false).await, None);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_fresh_cache() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.05));

        cache.get(AssetKind::GoldToken, false).await;
        source.set(AssetKind::GoldToken, Ok(0.06));
        let value = cache.get(AssetKind::GoldToken, true).await;

        assert_eq!(value, Some(0.06));
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_successful_gold_fetch_recorded_in_history() {
        let (source, db, _clock, cache) = setup();
        source.set(AssetKind::GoldToken, Ok(0.042));

        cache.get(AssetKind::GoldToken, false).await;

        assert_eq!(db.latest_gold_price().await.unwrap(), Some(0.042));
    }

    #[tokio::test]
    async fn test_sol_fetches_are_not_recorded_in_history() {
        let (source, db, _clock, cache) = setup();
        source.set(AssetKind::SolUsd, Ok(150.0));

        cache.get(AssetKind::SolUsd, false).await;

        assert_eq!(db.latest_gold_price().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_nft_price_usd_multiplies_legs() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::NftFloor, Ok(0.5));
        source.set(AssetKind::SolUsd, Ok(150.0));

        let composite = cache.nft_price_usd().await.unwrap();
        assert_eq!(composite.price, 75.0);
        assert_eq!(composite.price_sol, 0.5);
        assert_eq!(composite.sol_usd, 150.0);
    }

    #[tokio::test]
    async fn test_nft_price_usd_unavailable_when_leg_absent() {
        let (source, _db, _clock, cache) = setup();
        source.set(AssetKind::NftFloor, Ok(0.5));
        source.set(AssetKind::SolUsd, Err(ApiError::Timeout));

        let result = cache.nft_price_usd().await;
        assert!(matches!(
            result,
            Err(TrackerError::PriceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_nft_price_usd_survives_leg_with_stale_cache() {
        let (source, _db, clock, cache) = setup();
        source.set(AssetKind::NftFloor, Ok(0.5));
        source.set(AssetKind::SolUsd, Ok(150.0));
        cache.nft_price_usd().await.unwrap();

        // Both legs expired, both live fetches now failing: the stale
        // cached values still satisfy the composite read.
        clock.advance(Duration::minutes(10));
        source.set(AssetKind::NftFloor, Err(ApiError::Timeout));
        source.set(AssetKind::SolUsd, Err(ApiError::Timeout));

        let composite = cache.nft_price_usd().await.unwrap();
        assert_eq!(composite.price, 75.0);
    }
}
