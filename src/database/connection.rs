use crate::database::loot::PREDEFINED_LOOT;
use crate::logger::{self, LogTag};
use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// SQLite database handle shared across the application
///
/// All access goes through the inner Mutex; each logical operation locks,
/// runs its statements, and releases. No transaction spans more than one
/// logical operation.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at the given path, bootstrap the
    /// schema, and seed the base loot price table if it is empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        logger::debug(
            LogTag::Database,
            &format!("Database ready at {}", path.as_ref().display()),
        );
        Ok(db)
    }

    /// In-memory database for tests
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                rarity TEXT NOT NULL,
                source TEXT NOT NULL,
                current_price REAL NOT NULL,
                weight REAL NOT NULL DEFAULT 1.0,
                tier INTEGER,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS price_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL,
                price REAL NOT NULL,
                timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (item_id) REFERENCES inventory(id)
            );
            CREATE TABLE IF NOT EXISTS base_loot_prices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                source TEXT NOT NULL,
                rarity TEXT NOT NULL,
                base_price REAL NOT NULL,
                weight REAL NOT NULL,
                tier INTEGER,
                last_updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(name, source, rarity)
            );
            CREATE TABLE IF NOT EXISTS base_price_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                base_loot_id INTEGER NOT NULL,
                price REAL NOT NULL,
                timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (base_loot_id) REFERENCES base_loot_prices(id)
            );
            CREATE TABLE IF NOT EXISTS gold_earnings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount REAL NOT NULL,
                source TEXT DEFAULT 'Quest',
                timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS gold_price_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                price REAL NOT NULL
            );",
        )?;

        // Seed base loot prices once
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM base_loot_prices", [], |row| row.get(0))?;
        if count == 0 {
            for item in PREDEFINED_LOOT {
                conn.execute(
                    "INSERT INTO base_loot_prices (name, source, rarity, base_price, weight, tier)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        item.name,
                        item.source,
                        item.rarity,
                        item.price,
                        item.weight,
                        item.tier
                    ],
                )?;
                let base_loot_id = conn.last_insert_rowid();
                conn.execute(
                    "INSERT INTO base_price_history (base_loot_id, price) VALUES (?1, ?2)",
                    params![base_loot_id, item.price],
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.db");

        let db = Database::open(&path).unwrap();
        drop(db);

        assert!(path.exists());
        // Reopening an existing database is not an error
        Database::open(&path).unwrap();
    }

    #[test]
    fn test_schema_bootstrap_seeds_loot_once() {
        let db = Database::open_in_memory().unwrap();

        let conn = db.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM base_loot_prices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, PREDEFINED_LOOT.len());

        let history: i64 = conn
            .query_row("SELECT COUNT(*) FROM base_price_history", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(history as usize, PREDEFINED_LOOT.len());
        drop(conn);

        // Re-running the bootstrap must not duplicate the seed
        db.init_schema().unwrap();
        let conn = db.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM base_loot_prices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, PREDEFINED_LOOT.len());
    }
}
