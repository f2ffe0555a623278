use crate::database::connection::Database;
use crate::database::models::InventoryItem;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// All inventory items, most valuable first
    pub async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, quantity, rarity, source, current_price, weight, tier
             FROM inventory ORDER BY current_price DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(InventoryItem {
                id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
                rarity: row.get(3)?,
                source: row.get(4)?,
                current_price: row.get(5)?,
                weight: row.get(6)?,
                tier: row.get(7)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Insert or update an inventory item, keyed by (name, tier)
    pub async fn upsert_inventory_item(
        &self,
        name: &str,
        quantity: i64,
        rarity: &str,
        source: &str,
        current_price: f64,
        weight: f64,
        tier: Option<i64>,
    ) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM inventory WHERE name = ?1 AND tier IS ?2",
                params![name, tier],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(id) => {
                conn.execute(
                    "UPDATE inventory
                     SET quantity = ?1, rarity = ?2, source = ?3, current_price = ?4, weight = ?5
                     WHERE id = ?6",
                    params![quantity, rarity, source, current_price, weight, id],
                )?;
            }
            None => {
                conn.execute(
                    "INSERT INTO inventory (name, quantity, rarity, source, current_price, weight, tier)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![name, quantity, rarity, source, current_price, weight, tier],
                )?;
            }
        }

        Ok(())
    }

    /// Average price-per-weight efficiency of comparable items
    /// (same rarity and source, a different name, positive weight)
    pub async fn avg_efficiency(
        &self,
        rarity: &str,
        source: &str,
        exclude_name: &str,
    ) -> Result<Option<f64>> {
        let conn = self.conn.lock().unwrap();
        let avg: Option<f64> = conn.query_row(
            "SELECT AVG(current_price / NULLIF(weight, 0)) FROM inventory
             WHERE rarity = ?1 AND source = ?2 AND name != ?3 AND weight > 0",
            params![rarity, source, exclude_name],
            |row| row.get(0),
        )?;
        Ok(avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inventory_upsert_and_listing_order() {
        let db = Database::open_in_memory().unwrap();

        db.upsert_inventory_item("Wooden Torch", 3, "grey", "quest", 4.9, 1.0, None)
            .await
            .unwrap();
        db.upsert_inventory_item("Crystal Ball", 1, "blue", "quest", 194.4, 4.0, None)
            .await
            .unwrap();
        // Second upsert with the same key updates in place
        db.upsert_inventory_item("Wooden Torch", 5, "grey", "quest", 5.1, 1.0, None)
            .await
            .unwrap();

        let items = db.list_inventory().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Crystal Ball");
        assert_eq!(items[1].quantity, 5);
        assert_eq!(items[1].current_price, 5.1);
    }

    #[tokio::test]
    async fn test_avg_efficiency_excludes_item_and_zero_weights() {
        let db = Database::open_in_memory().unwrap();

        db.upsert_inventory_item("A", 1, "grey", "quest", 10.0, 1.0, None).await.unwrap();
        db.upsert_inventory_item("B", 1, "grey", "quest", 30.0, 1.0, None).await.unwrap();
        db.upsert_inventory_item("C", 1, "grey", "quest", 99.0, 0.0, None).await.unwrap();

        // Average over B only: A excluded by name, C excluded by weight
        let avg = db.avg_efficiency("grey", "quest", "A").await.unwrap();
        assert_eq!(avg, Some(30.0));

        // No comparable items at all
        let none = db.avg_efficiency("purple", "dungeon", "A").await.unwrap();
        assert_eq!(none, None);
    }
}
