use crate::database::connection::Database;
use crate::database::models::EarningsRecord;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

impl Database {
    /// Append a gold earnings row. Rows are append-only: several entries
    /// may exist for the same calendar date (quest + dungeon same day).
    pub async fn add_earning(&self, date: NaiveDate, amount: f64, source: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO gold_earnings (date, amount, source) VALUES (?1, ?2, ?3)",
            params![date.format("%Y-%m-%d").to_string(), amount, source],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All earnings rows, most recent date first
    pub async fn list_earnings(&self) -> Result<Vec<EarningsRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, date, amount, source FROM gold_earnings ORDER BY date DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(1)?;
            Ok((
                row.get::<_, i64>(0)?,
                date_str,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut earnings = Vec::new();
        for row in rows {
            let (id, date_str, amount, source) = row?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Bad earnings date {:?}: {}", date_str, e))?;
            earnings.push(EarningsRecord {
                id,
                date,
                amount,
                source,
            });
        }

        Ok(earnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_earnings_append_and_order() {
        let db = Database::open_in_memory().unwrap();

        db.add_earning(date("2024-01-01"), 100.0, "Quest").await.unwrap();
        db.add_earning(date("2024-01-03"), 50.0, "Dungeon").await.unwrap();
        db.add_earning(date("2024-01-02"), 150.0, "Quest").await.unwrap();

        let earnings = db.list_earnings().await.unwrap();
        assert_eq!(earnings.len(), 3);
        assert_eq!(earnings[0].date, date("2024-01-03"));
        assert_eq!(earnings[2].date, date("2024-01-01"));
    }

    #[tokio::test]
    async fn test_multiple_earnings_per_date_are_kept() {
        let db = Database::open_in_memory().unwrap();

        db.add_earning(date("2024-01-01"), 100.0, "Quest").await.unwrap();
        db.add_earning(date("2024-01-01"), 40.0, "Dungeon").await.unwrap();

        let earnings = db.list_earnings().await.unwrap();
        assert_eq!(earnings.len(), 2);
        let total: f64 = earnings.iter().map(|e| e.amount).sum();
        assert_eq!(total, 140.0);
    }
}
