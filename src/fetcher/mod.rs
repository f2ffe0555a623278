//! Scheduled game API snapshot fetcher
//!
//! Pulls account and game data from the production API and writes each
//! payload to `data/<name>.json` wrapped as `{timestamp, data}` for the
//! frontend to consume. A failed endpoint logs and falls back to its
//! default payload; one bad endpoint never aborts the sweep.

use crate::apis::game::GameApiClient;
use crate::apis::ApiError;
use crate::logger::{self, LogTag};
use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Page size for the recent-activity endpoints
const RECENT_LIMIT: u64 = 100_000;

/// Dungeon identifiers and display names for the drop chance sweep
const DUNGEONS: &[(&str, &str)] = &[
    ("CrimsonHall", "Crimson Hall"),
    ("FrostboundKeep", "Frostbound Keep"),
    ("AncientTombs", "Ancient Tombs"),
    ("ThievesDen", "Thieves Den"),
    ("ForgottenCrossroads", "Forgotten Grove"),
];

/// NFT classes tried in order until one returns drops
const NFT_CLASSES: &[&str] = &["Warrior", "Mage", "Marksman"];

pub struct DataFetcher {
    game: Arc<GameApiClient>,
    data_dir: PathBuf,
}

impl DataFetcher {
    pub fn new(game: Arc<GameApiClient>, data_dir: PathBuf) -> Self {
        Self { game, data_dir }
    }

    /// Fetch every snapshot once
    pub async fn fetch_all(&self) {
        logger::info(LogTag::Fetcher, "Starting data fetch");

        if let Err(e) = fs::create_dir_all(&self.data_dir) {
            logger::error(
                LogTag::Fetcher,
                &format!("Cannot create data dir {}: {}", self.data_dir.display(), e),
            );
            return;
        }

        self.fetch_and_save(
            "/user/achievement-stat/me",
            &[],
            "achievement_stats.json",
            json!({
                "totalQuestCompleted": 0,
                "totalDungeonsCompleted": 0,
                "totalRaidBossesKilled": 0,
                "totalGoldEarned": 0
            }),
            false,
        )
        .await;

        self.fetch_and_save(
            "/fungible-asset/my-balances",
            &[],
            "fungible_balances.json",
            json!([]),
            false,
        )
        .await;

        self.fetch_and_save("/dungeon", &[], "dungeon_definitions.json", json!([]), false)
            .await;

        self.fetch_and_save(
            "/item/get-all-items",
            &[],
            "inventory_items.json",
            json!([]),
            false,
        )
        .await;

        let limit = [("limit", RECENT_LIMIT.to_string())];
        self.fetch_and_save(
            "/quest/recent-claims",
            &limit,
            "recent_quest_claims.json",
            json!([]),
            true,
        )
        .await;

        self.fetch_and_save(
            "/trip/recent-rewards",
            &limit,
            "recent_trip_rewards.json",
            json!([]),
            true,
        )
        .await;

        self.fetch_and_save(
            "/loot-exchange/recent-exchanges",
            &limit,
            "recent_exchanges.json",
            json!([]),
            true,
        )
        .await;

        self.fetch_drop_chances().await;

        logger::info(LogTag::Fetcher, "Completed data fetch");
    }

    /// Fetch snapshots forever on a fixed interval
    pub async fn run_loop(&self, interval_seconds: u64) {
        loop {
            self.fetch_all().await;
            tokio::time::sleep(std::time::Duration::from_secs(interval_seconds)).await;
        }
    }

    async fn fetch_and_save(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        filename: &str,
        default: Value,
        filter_wallet: bool,
    ) {
        let data = match self.game.get_json(endpoint, params).await {
            Ok(data) => {
                if filter_wallet {
                    filter_by_wallet(data, self.game.wallet_address())
                } else {
                    data
                }
            }
            Err(e) => {
                self.log_fetch_error(endpoint, &e);
                default
            }
        };

        self.save(filename, data);
    }

    /// Per-dungeon base item drop chances. Each class is tried until one
    /// returns drops for the dungeon.
    async fn fetch_drop_chances(&self) {
        let mut dungeon_specific = serde_json::Map::new();

        for (dungeon_id, dungeon_name) in DUNGEONS {
            logger::debug(
                LogTag::Fetcher,
                &format!("Fetching drops for {}", dungeon_name),
            );

            let mut drops = json!([]);
            for nft_class in NFT_CLASSES {
                let params = [
                    ("dungeonId", dungeon_id.to_string()),
                    ("nftClass", nft_class.to_string()),
                ];
                match self
                    .game
                    .get_json("/dungeon/base-item-drop-chances", &params)
                    .await
                {
                    Ok(body) => {
                        let found = body.get("data").cloned().unwrap_or(Value::Null);
                        if found.as_array().map_or(false, |a| !a.is_empty()) {
                            drops = found;
                            break;
                        }
                        logger::debug(
                            LogTag::Fetcher,
                            &format!("No drops for {} with {}", dungeon_name, nft_class),
                        );
                    }
                    Err(e) => {
                        self.log_fetch_error("/dungeon/base-item-drop-chances", &e);
                    }
                }
            }

            dungeon_specific.insert(
                dungeon_id.to_string(),
                json!({ "name": dungeon_name, "drops": drops }),
            );
        }

        self.save(
            "drop_chances.json",
            json!({ "dungeon_specific": dungeon_specific }),
        );
    }

    fn log_fetch_error(&self, endpoint: &str, error: &ApiError) {
        match error {
            ApiError::Disabled => logger::debug(
                LogTag::Fetcher,
                &format!("Skipping {}: no game API credentials", endpoint),
            ),
            _ => logger::warning(
                LogTag::Fetcher,
                &format!("Error fetching {}: {}", endpoint, error),
            ),
        }
    }

    fn save(&self, filename: &str, data: Value) {
        let wrapped = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "data": data,
        });

        let path = self.data_dir.join(filename);
        match serde_json::to_string_pretty(&wrapped) {
            Ok(body) => {
                if let Err(e) = fs::write(&path, body) {
                    logger::warning(
                        LogTag::Fetcher,
                        &format!("Failed to write {}: {}", path.display(), e),
                    );
                } else {
                    logger::debug(LogTag::Fetcher, &format!("Saved {}", filename));
                }
            }
            Err(e) => {
                logger::warning(
                    LogTag::Fetcher,
                    &format!("Failed to serialize {}: {}", filename, e),
                );
            }
        }
    }
}

/// Keep only list entries belonging to the configured wallet.
/// Non-list payloads pass through untouched.
fn filter_by_wallet(data: Value, wallet: &str) -> Value {
    match data {
        Value::Array(entries) => Value::Array(
            entries
                .into_iter()
                .filter(|entry| {
                    entry.get("walletId").and_then(|w| w.as_str()) == Some(wallet)
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_wallet_keeps_matching_entries() {
        let data = json!([
            {"walletId": "abc", "amount": 10},
            {"walletId": "xyz", "amount": 20},
            {"amount": 30}
        ]);

        let filtered = filter_by_wallet(data, "abc");
        let entries = filtered.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["amount"], 10);
    }

    #[test]
    fn test_filter_by_wallet_passes_objects_through() {
        let data = json!({"totalGoldEarned": 5});
        let filtered = filter_by_wallet(data.clone(), "abc");
        assert_eq!(filtered, data);
    }
}
