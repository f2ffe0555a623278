use crate::database::connection::Database;
use crate::database::models::GoldPricePoint;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Append a gold price audit row. Timestamps are stored as RFC 3339
    /// UTC strings so lexicographic ordering matches chronological order.
    pub async fn append_gold_price(&self, timestamp: DateTime<Utc>, price: f64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO gold_price_history (timestamp, price) VALUES (?1, ?2)",
            params![timestamp.to_rfc3339(), price],
        )?;
        Ok(())
    }

    /// Most recent gold price in the audit trail, if any
    pub async fn latest_gold_price(&self) -> Result<Option<f64>> {
        let conn = self.conn.lock().unwrap();
        let price = conn
            .query_row(
                "SELECT price FROM gold_price_history ORDER BY timestamp DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(price)
    }

    /// Most recent gold price at least 24 hours older than `now`,
    /// used for the 24h change calculation
    pub async fn gold_price_24h_ago(&self, now: DateTime<Utc>) -> Result<Option<f64>> {
        let cutoff = (now - Duration::hours(24)).to_rfc3339();
        let conn = self.conn.lock().unwrap();
        let price = conn
            .query_row(
                "SELECT price FROM gold_price_history
                 WHERE timestamp < ?1
                 ORDER BY timestamp DESC LIMIT 1",
                params![cutoff],
                |row| row.get(0),
            )
            .optional()?;
        Ok(price)
    }

    /// Recent gold price history, newest first
    pub async fn gold_price_history(&self, limit: u32) -> Result<Vec<GoldPricePoint>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT timestamp, price FROM gold_price_history
             ORDER BY timestamp DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut points = Vec::new();
        for row in rows {
            let (ts, price) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&ts)
                .map_err(|e| anyhow::anyhow!("Bad price timestamp {:?}: {}", ts, e))?
                .with_timezone(&Utc);
            points.push(GoldPricePoint { timestamp, price });
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_gold_price() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        assert_eq!(db.latest_gold_price().await.unwrap(), None);

        db.append_gold_price(now - Duration::minutes(10), 0.08).await.unwrap();
        db.append_gold_price(now, 0.12).await.unwrap();

        assert_eq!(db.latest_gold_price().await.unwrap(), Some(0.12));
    }

    #[tokio::test]
    async fn test_gold_price_24h_ago() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        db.append_gold_price(now - Duration::hours(30), 0.05).await.unwrap();
        db.append_gold_price(now - Duration::hours(25), 0.06).await.unwrap();
        db.append_gold_price(now - Duration::hours(1), 0.10).await.unwrap();

        // Most recent row older than the 24h cutoff
        assert_eq!(db.gold_price_24h_ago(now).await.unwrap(), Some(0.06));
    }

    #[tokio::test]
    async fn test_gold_price_history_order() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        db.append_gold_price(now - Duration::minutes(2), 0.08).await.unwrap();
        db.append_gold_price(now - Duration::minutes(1), 0.09).await.unwrap();
        db.append_gold_price(now, 0.10).await.unwrap();

        let history = db.gold_price_history(2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].price, 0.10);
        assert_eq!(history[1].price, 0.09);
    }
}
