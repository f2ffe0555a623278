/// Birdeye API client
///
/// API Documentation: https://docs.birdeye.so/reference/get-defi-price
///
/// Endpoints implemented:
/// 1. /defi/price?address=<mint> - Current USD price for a Solana mint

pub mod types;

use self::types::BirdeyePriceResponse;
use crate::apis::client::HttpClient;
use crate::apis::ApiError;
use crate::arguments::is_debug_api_enabled;
use crate::logger::{self, LogTag};

// ============================================================================
// API CONFIGURATION - Hardcoded for Birdeye API
// ============================================================================

const BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so";

/// Request timeout - the price endpoint is fast, 5s is sufficient
const TIMEOUT_SECS: u64 = 5;

/// Gold token mint address
pub const GOLD_MINT: &str = "GoLDDDNBPD72mSCYbC75GoFZ1e97Uczakp8yNi7JHrK4";

/// Wrapped SOL mint address, used for the SOL/USD leg
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct BirdeyeClient {
    http_client: HttpClient,
    api_key: String,
}

impl BirdeyeClient {
    /// An empty API key produces a permanently disabled client; callers
    /// get `ApiError::Disabled` and fall through their fallback chain.
    pub fn new(api_key: String) -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self {
            http_client,
            api_key,
        })
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fetch the current USD price for a mint
    ///
    /// Only a successful response carrying a positive value is returned;
    /// everything else maps to an ApiError variant.
    pub async fn fetch_price(&self, mint: &str) -> Result<f64, ApiError> {
        if !self.is_enabled() {
            return Err(ApiError::Disabled);
        }

        let url = format!("{}/defi/price?address={}", BIRDEYE_BASE_URL, mint);

        if is_debug_api_enabled() {
            logger::debug(LogTag::Api, &format!("Birdeye request: {}", url));
        }

        let response = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json")
            .header("x-chain", "solana")
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: BirdeyePriceResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        match body.data.and_then(|d| d.value) {
            Some(value) if body.success && value > 0.0 && value.is_finite() => Ok(value),
            _ => Err(ApiError::InvalidResponse(
                "Missing or non-positive price value".to_string(),
            )),
        }
    }
}
