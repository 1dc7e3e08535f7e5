use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Booking, BookingId, BookingStatus, Item, ItemId, User, UserId};

/// 予約詳細に埋め込むアイテムの要約
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
}

/// 予約詳細に埋め込む予約者の要約
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookerSummary {
    pub id: UserId,
    pub name: String,
}

/// 予約詳細（表示名を解決済み）
///
/// リクエスト単位で組み立てられ、レスポンス作成後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDetails {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemSummary,
    pub booker: BookerSummary,
}

impl BookingDetails {
    pub fn new(booking: &Booking, item: &Item, booker: &User) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            item: ItemSummary {
                id: item.id,
                name: item.name.clone(),
            },
            booker: BookerSummary {
                id: booker.id,
                name: booker.name.clone(),
            },
        }
    }
}
