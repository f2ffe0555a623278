use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One gold earnings row. `date` is a calendar day, not a timestamp;
/// multiple rows may share a date (quest + dungeon on the same day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub source: String,
}

/// One inventory row, ordered by current_price in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub rarity: String,
    pub source: String,
    pub current_price: f64,
    pub weight: f64,
    pub tier: Option<i64>,
}

/// One gold price audit row, appended on every successful live fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldPricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
