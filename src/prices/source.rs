/// Live price source abstraction
///
/// The cache talks to one seam; the live implementation routes each
/// asset kind to its upstream API. Tests substitute a scripted source.
use crate::apis::birdeye::{BirdeyeClient, GOLD_MINT, WRAPPED_SOL_MINT};
use crate::apis::magiceden::MagicEdenClient;
use crate::apis::ApiError;
use crate::prices::AssetKind;
use async_trait::async_trait;

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, kind: AssetKind) -> Result<f64, ApiError>;
}

/// Routes price fetches to Birdeye (gold, SOL/USD) and Magic Eden
/// (NFT floor, in SOL)
pub struct LivePriceSource {
    birdeye: BirdeyeClient,
    magiceden: MagicEdenClient,
    collection: String,
}

impl LivePriceSource {
    pub fn new(
        birdeye: BirdeyeClient,
        magiceden: MagicEdenClient,
        collection: String,
    ) -> Self {
        Self {
            birdeye,
            magiceden,
            collection,
        }
    }
}

#[async_trait]
impl PriceSource for LivePriceSource {
    async fn fetch(&self, kind: AssetKind) -> Result<f64, ApiError> {
        match kind {
            AssetKind::GoldToken => self.birdeye.fetch_price(GOLD_MINT).await,
            AssetKind::SolUsd => self.birdeye.fetch_price(WRAPPED_SOL_MINT).await,
            AssetKind::NftFloor => self.magiceden.fetch_floor_price_sol(&self.collection).await,
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted price source that counts fetch attempts per asset kind
    pub struct FakeSource {
        responses: Mutex<HashMap<AssetKind, Result<f64, ApiError>>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn set(&self, kind: AssetKind, response: Result<f64, ApiError>) {
            self.responses.lock().unwrap().insert(kind, response);
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for FakeSource {
        async fn fetch(&self, kind: AssetKind) -> Result<f64, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .get(&kind)
                .cloned()
                .unwrap_or(Err(ApiError::Disabled))
        }
    }
}
