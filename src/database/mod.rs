//! SQLite persistence layer
//!
//! A single `Database` handle wraps the connection; per-topic operations
//! live in their own files (earnings, prices, inventory). Schema
//! bootstrap and the base loot seed happen once in `Database::open`.

pub mod connection;
pub mod earnings;
pub mod inventory;
pub mod loot;
pub mod models;
pub mod prices;

pub use connection::Database;
pub use models::{EarningsRecord, GoldPricePoint, InventoryItem};
