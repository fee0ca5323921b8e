//! Item Storage
//! Mission: Persist the electronics inventory with SQLite

use crate::db::Database;
use crate::inventory::models::Item;
use anyhow::{Context, Result};
use rusqlite::params;
use tracing::info;

/// Demo inventory inserted by `--seed-demo-items` when the table is empty
const DEMO_ITEMS: [(&str, i64); 5] = [
    ("Apple iPhone 13 Pro Max", 20),
    ("Samsung Galaxy S21 Ultra", 15),
    ("Sony WH-1000XM4 Wireless Headphones", 30),
    ("Dell XPS 13 Laptop", 10),
    ("GoPro HERO10 Black Action Camera", 8),
];

/// Item storage over the shared database handle
pub struct ItemStore {
    db: Database,
}

impl ItemStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all items, oldest first
    pub async fn all_items(&self) -> Result<Vec<Item>> {
        let conn = self.db.conn().await;

        let mut stmt = conn.prepare_cached(
            "SELECT item_id, item_name, item_quantity, created_at, updated_at
             FROM electronics_items ORDER BY item_id ASC",
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(Item {
                    item_id: row.get(0)?,
                    item_name: row.get(1)?,
                    item_quantity: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Insert an item and return the stored row
    pub async fn create_item(&self, item_name: &str, item_quantity: i64) -> Result<Item> {
        let conn = self.db.conn().await;

        conn.execute(
            "INSERT INTO electronics_items (item_name, item_quantity) VALUES (?1, ?2)",
            params![item_name, item_quantity],
        )
        .context("Failed to insert item")?;

        let item_id = conn.last_insert_rowid();
        let item = conn.query_row(
            "SELECT item_id, item_name, item_quantity, created_at, updated_at
             FROM electronics_items WHERE item_id = ?1",
            params![item_id],
            |row| {
                Ok(Item {
                    item_id: row.get(0)?,
                    item_name: row.get(1)?,
                    item_quantity: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            },
        )?;

        info!("✅ Created item: {} (item_id {})", item_name, item_id);

        Ok(item)
    }

    /// Apply a partial update. Returns false when no row matches.
    pub async fn update_item(
        &self,
        item_id: i64,
        item_name: Option<&str>,
        item_quantity: Option<i64>,
    ) -> Result<bool> {
        let conn = self.db.conn().await;

        let changed = conn.execute(
            "UPDATE electronics_items SET
                item_name = COALESCE(?1, item_name),
                item_quantity = COALESCE(?2, item_quantity),
                updated_at = datetime('now')
             WHERE item_id = ?3",
            params![item_name, item_quantity, item_id],
        )?;

        Ok(changed > 0)
    }

    /// Delete by id. Returns false when no row matches.
    pub async fn delete_item(&self, item_id: i64) -> Result<bool> {
        let conn = self.db.conn().await;

        let changed = conn.execute(
            "DELETE FROM electronics_items WHERE item_id = ?1",
            params![item_id],
        )?;

        if changed > 0 {
            info!("🗑️  Deleted item: {}", item_id);
        }

        Ok(changed > 0)
    }

    /// Seed the demo inventory. No-op unless the table is empty.
    pub async fn seed_demo_items(&self) -> Result<usize> {
        let conn = self.db.conn().await;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM electronics_items", [], |row| {
                row.get(0)
            })?;
        if count > 0 {
            return Ok(0);
        }

        for (name, quantity) in DEMO_ITEMS {
            conn.execute(
                "INSERT INTO electronics_items (item_name, item_quantity) VALUES (?1, ?2)",
                params![name, quantity],
            )
            .with_context(|| format!("seed item {}", name))?;
        }

        info!("📦 Seeded {} demo items", DEMO_ITEMS.len());
        Ok(DEMO_ITEMS.len())
    }
}
