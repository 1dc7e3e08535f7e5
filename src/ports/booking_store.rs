use crate::domain::{Booking, BookingId, BookingStatus, ItemId, NewBooking, PageRequest, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// 予約の永続化と検索を抽象化する。
/// 一覧系のクエリはすべてストア側で並び順を保証し、呼び出し側は再ソートしない。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// IDで予約を取得する
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 予約者の全予約を取得する（開始日時の降順）
    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>>;

    /// 指定アイテム群の全予約を取得する（開始日時の降順）
    ///
    /// 所有者向けの予約一覧に使用される。
    async fn find_by_items_desc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>>;

    /// 指定アイテム群の全予約を取得する（開始日時の昇順）
    ///
    /// 直前・直後の予約の算出に使用される。
    async fn find_by_items_asc(&self, item_ids: &[ItemId]) -> Result<Vec<Booking>>;

    /// 全予約から1ページ分を取得する（開始日時の降順）
    ///
    /// スコープを絞らないグローバルなページ。
    /// 予約者・所有者による絞り込みは呼び出し側が取得後に行う。
    async fn find_page(&self, page: PageRequest) -> Result<Vec<Booking>>;

    /// 新しい予約を保存する
    ///
    /// IDはストアが採番し、versionは0で作成される。
    async fn insert(&self, booking: NewBooking) -> Result<Booking>;

    /// 予約ステータスを更新する（compare-and-swap）
    ///
    /// 保存済みのversionが `expected_version` と一致する場合のみ更新し、
    /// versionを1つ進めて `true` を返す。一致しない場合は何もせず `false`。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected_version: i32,
        status: BookingStatus,
    ) -> Result<bool>;
}
