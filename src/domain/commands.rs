use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId, UserId};

/// コマンド：アイテムの予約を申し込む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：予約を承認または却下する（アイテム所有者のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub booking_id: BookingId,
    pub owner_id: UserId,
    pub approved: bool,
}
