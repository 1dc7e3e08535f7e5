use crate::domain::{Booking, BookingId, BookingStatus, ItemId, NewBooking, PageRequest, UserId};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        id: BookingId::new(row.get("id")),
        start: row.get("start_at"),
        end: row.get("end_at"),
        item_id: ItemId::new(row.get("item_id")),
        booker_id: UserId::new(row.get("booker_id")),
        status,
        version: row.get("version"),
    })
}

fn item_id_values(item_ids: &[ItemId]) -> Vec<i64> {
    item_ids.iter().map(|id| id.value()).collect()
}

/// BookingStoreのPostgreSQL実装
///
/// 一覧系はすべて `start_at` で並べ、同時刻は `id` で順序を確定させる。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT id, start_at, end_at, item_id, booker_id, status, version
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// (booker_id, start_at)のインデックスを使用
    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_at, end_at, item_id, booker_id, status, version
            FROM bookings
            WHERE booker_id = $1
            ORDER BY start_at DESC, id DESC
            "#,
        )
        .bind(booker_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_by_items_desc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_at, end_at, item_id, booker_id, status, version
            FROM bookings
            WHERE item_id = ANY($1)
            ORDER BY start_at DESC, id DESC
            "#,
        )
        .bind(item_id_values(item_ids))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_by_items_asc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_at, end_at, item_id, booker_id, status, version
            FROM bookings
            WHERE item_id = ANY($1)
            ORDER BY start_at ASC, id ASC
            "#,
        )
        .bind(item_id_values(item_ids))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_at, end_at, item_id, booker_id, status, version
            FROM bookings
            ORDER BY start_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (start_at, end_at, item_id, booker_id, status, version)
            VALUES ($1, $2, $3, $4, $5, 0)
            RETURNING id, start_at, end_at, item_id, booker_id, status, version
            "#,
        )
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.item_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking(&row)
    }

    /// versionが一致する行だけを更新する（楽観ロック）
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected_version: i32,
        status: BookingStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $3, version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(booking_id.value())
        .bind(expected_version)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
