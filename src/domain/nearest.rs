use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Booking, BookingId, UserId};

/// アイテム表示用の予約参照（予約IDと予約者IDのみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRef {
    pub id: BookingId,
    pub booker_id: UserId,
}

impl From<&Booking> for BookingRef {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

/// 基準時刻の直前・直後の予約
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestBookingPair {
    /// start < now の中で最も遅い予約
    pub last: Option<BookingRef>,
    /// start >= now の中で最も早い予約
    pub next: Option<BookingRef>,
}

/// 純粋関数：直前・直後の予約を求める
///
/// `bookings` は1つのアイテムの予約で、開始日時の昇順に並んでいること。
/// 前方に1回だけ走査し、最初に `start >= now` となった予約を next として打ち切る。
/// 全予約が過去の場合は最後に見た予約が last、next はなし。
pub fn resolve_nearest(bookings: &[Booking], now: DateTime<Utc>) -> NearestBookingPair {
    let mut last = None;

    for booking in bookings {
        if booking.start < now {
            last = Some(BookingRef::from(booking));
        } else {
            return NearestBookingPair {
                last,
                next: Some(BookingRef::from(booking)),
            };
        }
    }

    NearestBookingPair { last, next: None }
}
