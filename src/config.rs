use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runtime configuration loaded from config.json
///
/// A missing config file is not an error: defaults are used and secrets
/// can still arrive via environment variables (BIRDEYE_API_KEY,
/// GAME_BEARER_TOKEN, GAME_WALLET_ADDRESS), honoring a .env file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Birdeye API key for the gold token and SOL/USD price legs.
    /// Empty string means the live source is disabled and price reads
    /// degrade through the fallback chain.
    #[serde(default)]
    pub birdeye_api_key: String,

    /// Magic Eden collection symbol for the NFT floor price
    #[serde(default = "default_collection_symbol")]
    pub collection_symbol: String,

    pub game: GameApiConfig,
    pub roi: RoiConfig,
    pub database: DatabaseConfig,
    pub webserver: WebserverConfig,
    pub fetcher: FetcherConfig,
}

/// Credentials for the game production API (fetcher and proxy)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameApiConfig {
    #[serde(default)]
    pub bearer_token: String,
    #[serde(default)]
    pub wallet_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Fixed initial capital outlay in USD used for ROI math
    pub total_investment: f64,
    /// Estimator strategy: "lifetime-average" or "trailing-window"
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
    /// Browser origin allowed by CORS
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
    pub data_dir: String,
}

fn default_collection_symbol() -> String {
    "defi_dungeons".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            birdeye_api_key: String::new(),
            collection_symbol: default_collection_symbol(),
            game: GameApiConfig::default(),
            roi: RoiConfig {
                total_investment: 475.0,
                strategy: "lifetime-average".to_string(),
            },
            database: DatabaseConfig {
                path: "dungeontracker.db".to_string(),
            },
            webserver: WebserverConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                allowed_origin: "http://localhost:3000".to_string(),
            },
            fetcher: FetcherConfig {
                enabled: false,
                interval_seconds: 3600,
                data_dir: "data".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist. Environment variables override file
    /// values for secrets.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            let data = fs::read_to_string(&path).with_context(|| {
                format!("Failed to read config file {}", path.as_ref().display())
            })?;
            serde_json::from_str(&data).with_context(|| {
                format!("Failed to parse config file {}", path.as_ref().display())
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("BIRDEYE_API_KEY") {
            if !key.is_empty() {
                self.birdeye_api_key = key;
            }
        }
        if let Ok(token) = std::env::var("GAME_BEARER_TOKEN") {
            if !token.is_empty() {
                self.game.bearer_token = token;
            }
        }
        if let Ok(wallet) = std::env::var("GAME_WALLET_ADDRESS") {
            if !wallet.is_empty() {
                self.game.wallet_address = wallet;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.roi.total_investment, 475.0);
        assert_eq!(config.roi.strategy, "lifetime-average");
        assert_eq!(config.webserver.port, 5000);
        assert!(config.birdeye_api_key.is_empty());
    }

    #[test]
    fn test_partial_config_parses_with_defaults() {
        let json = r#"{
            "game": {},
            "roi": {"total_investment": 425.0, "strategy": "trailing-window"},
            "database": {"path": "test.db"},
            "webserver": {"host": "0.0.0.0", "port": 8080, "allowed_origin": "http://localhost:3000"},
            "fetcher": {"enabled": true, "interval_seconds": 600, "data_dir": "data"}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.roi.total_investment, 425.0);
        assert_eq!(config.collection_symbol, "defi_dungeons");
        assert!(config.game.bearer_token.is_empty());
    }
}
