/// Game production API client
///
/// Authenticated access to the game's backend, used two ways:
/// - the data fetcher pulls snapshots with the configured credentials;
/// - the reverse proxy forwards browser requests with the caller's own
///   Authorization and wallet headers.
///
/// The payloads are opaque JSON; nothing here interprets them.
use crate::apis::client::HttpClient;
use crate::apis::ApiError;
use reqwest::Method;

// ============================================================================
// API CONFIGURATION
// ============================================================================

const GAME_API_BASE_URL: &str = "https://api-production.defidungeons.gg";

/// Request timeout for game API calls
const TIMEOUT_SECS: u64 = 10;

/// Browser-like headers the upstream expects
const ORIGIN: &str = "https://dungeons.game";
const REFERER: &str = "https://dungeons.game/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct GameApiClient {
    http_client: HttpClient,
    bearer_token: String,
    wallet_address: String,
}

impl GameApiClient {
    pub fn new(bearer_token: String, wallet_address: String) -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        Ok(Self {
            http_client,
            bearer_token,
            wallet_address,
        })
    }

    /// True when credentials for the configured wallet are present
    pub fn is_enabled(&self) -> bool {
        !self.bearer_token.is_empty() && !self.wallet_address.is_empty()
    }

    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    /// GET a game API endpoint as opaque JSON using the configured
    /// credentials (fetcher path)
    pub async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        if !self.is_enabled() {
            return Err(ApiError::Disabled);
        }

        let url = format!("{}{}", GAME_API_BASE_URL, path);

        let response = self
            .http_client
            .client()
            .get(&url)
            .query(params)
            .header("accept", "application/json, text/plain, */*")
            .header("authorization", format!("Bearer {}", self.bearer_token))
            .header("x-selected-wallet-address", &self.wallet_address)
            .header("Origin", ORIGIN)
            .header("Referer", REFERER)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Forward a request on behalf of a browser client (proxy path)
    ///
    /// Credentials come from the caller, not from configuration; the
    /// upstream response is returned as-is for the route layer to map.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        authorization: &str,
        wallet_address: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", GAME_API_BASE_URL, path_and_query);

        let mut request = self
            .http_client
            .client()
            .request(method, &url)
            .header("Authorization", authorization.trim())
            .header("x-selected-wallet-address", wallet_address.trim())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Origin", ORIGIN)
            .header("Referer", REFERER)
            .header("User-Agent", USER_AGENT);

        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        Ok(request.send().await?)
    }
}
