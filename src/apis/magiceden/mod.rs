/// Magic Eden API client
///
/// API Documentation: https://api.magiceden.dev/
///
/// Endpoints implemented:
/// 1. /v2/collections/{symbol}/stats - Collection stats including floor price

pub mod types;

use self::types::CollectionStats;
use crate::apis::client::HttpClient;
use crate::apis::ApiError;
use crate::arguments::is_debug_api_enabled;
use crate::logger::{self, LogTag};

// ============================================================================
// API CONFIGURATION - Hardcoded for Magic Eden API
// ============================================================================

const MAGICEDEN_BASE_URL: &str = "https://api-mainnet.magiceden.dev/v2";

/// Request timeout - Magic Eden can be slow under load, 10s recommended
const TIMEOUT_SECS: u64 = 10;

/// Lamports per SOL, for floor price conversion
const LAMPORTS_PER_SOL: f64 = 1e9;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct MagicEdenClient {
    http_client: HttpClient,
}

impl MagicEdenClient {
    pub fn new() -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self { http_client })
    }

    /// Fetch the collection floor price in SOL
    pub async fn fetch_floor_price_sol(&self, collection: &str) -> Result<f64, ApiError> {
        let url = format!("{}/collections/{}/stats", MAGICEDEN_BASE_URL, collection);

        if is_debug_api_enabled() {
            logger::debug(LogTag::Api, &format!("Magic Eden request: {}", url));
        }

        let response = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let stats: CollectionStats = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        match stats.floor_price {
            Some(lamports) if lamports > 0.0 => Ok(lamports / LAMPORTS_PER_SOL),
            _ => Err(ApiError::InvalidResponse(
                "Missing or non-positive floor price".to_string(),
            )),
        }
    }
}
