use crate::domain::{Booking, BookingId, BookingStatus, ItemId, NewBooking, PageRequest, UserId};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// BookingStoreのインメモリ実装
///
/// テストおよびデータベースなしでの動作確認用。
/// 並び順はPostgreSQL実装と同じ（開始日時、同時刻はIDで決める）。
pub struct BookingStore {
    bookings: Mutex<BTreeMap<BookingId, Booking>>,
    next_id: Mutex<i64>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// テスト用に任意の予約を登録する
    ///
    /// `insert` と異なり、過去日時や決定済みステータスの予約もそのまま保存する。
    pub fn seed(&self, booking: Booking) {
        let mut next_id = self.next_id.lock().unwrap();
        if booking.id.value() >= *next_id {
            *next_id = booking.id.value() + 1;
        }
        self.bookings.lock().unwrap().insert(booking.id, booking);
    }

    fn sorted_desc<F>(&self, predicate: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let mut result: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| predicate(*b))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
        result
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.lock().unwrap().get(&booking_id).cloned())
    }

    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>> {
        Ok(self.sorted_desc(|b| b.booker_id == booker_id))
    }

    async fn find_by_items_desc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>> {
        Ok(self.sorted_desc(|b| item_ids.contains(&b.item_id)))
    }

    async fn find_by_items_asc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>> {
        let mut result = self.sorted_desc(|b| item_ids.contains(&b.item_id));
        result.reverse();
        Ok(result)
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Booking>> {
        Ok(page.apply(&self.sorted_desc(|_| true)))
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            BookingId::new(id)
        };

        let booking = Booking {
            id,
            start: booking.start,
            end: booking.end,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: booking.status,
            version: 0,
        };
        self.bookings.lock().unwrap().insert(id, booking.clone());
        Ok(booking)
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected_version: i32,
        status: BookingStatus,
    ) -> Result<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&booking_id) {
            Some(booking) if booking.version == expected_version => {
                booking.status = status;
                booking.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
