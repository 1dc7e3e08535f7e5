use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_item(row: &PgRow) -> Item {
    Item {
        id: ItemId::new(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
        available: row.get("available"),
        owner_id: UserId::new(row.get("owner_id")),
    }
}

/// PostgreSQL implementation of ItemCatalog
///
/// Read-only access to the items table owned by the item management context.
pub struct ItemCatalog {
    pool: PgPool,
}

impl ItemCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, available, owner_id
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_item))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, available, owner_id
            FROM items
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_item).collect())
    }

    async fn find_ids_by_owner(&self, owner_id: UserId) -> Result<Vec<ItemId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM items
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(ItemId::new).collect())
    }
}
